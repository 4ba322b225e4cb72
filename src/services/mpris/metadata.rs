use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use futures::Stream;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::{
    CoercionError, EventSubscriptionBus, Interface, MprisError, PlayerBinding, PropertyValue,
    utils::from_mpris_micros,
};
use crate::services::common::Property;

/// Placeholder shown for metadata a player did not report.
pub const UNKNOWN_METADATA: &str = "Unknown";

/// Well-known metadata keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataField {
    /// `mpris:trackid`, the only required key
    TrackId,
    /// `mpris:length`
    Length,
    /// `mpris:artUrl`
    ArtUrl,
    /// `xesam:album`
    Album,
    /// `xesam:albumArtist`
    AlbumArtist,
    /// `xesam:artist`
    Artist,
    /// `xesam:asText`
    AsText,
    /// `xesam:audioBPM`
    AudioBpm,
    /// `xesam:autoRating`
    AutoRating,
    /// `xesam:comment`
    Comment,
    /// `xesam:composer`
    Composer,
    /// `xesam:contentCreated`
    ContentCreated,
    /// `xesam:discNumber`
    DiscNumber,
    /// `xesam:firstUsed`
    FirstUsed,
    /// `xesam:genre`
    Genre,
    /// `xesam:lastUsed`
    LastUsed,
    /// `xesam:lyricist`
    Lyricist,
    /// `xesam:title`
    Title,
    /// `xesam:trackNumber`
    TrackNumber,
    /// `xesam:url`
    Url,
    /// `xesam:useCount`
    UseCount,
    /// `xesam:userRating`
    UserRating,
}

impl MetadataField {
    /// Wire key of the field.
    pub const fn key(self) -> &'static str {
        match self {
            Self::TrackId => "mpris:trackid",
            Self::Length => "mpris:length",
            Self::ArtUrl => "mpris:artUrl",
            Self::Album => "xesam:album",
            Self::AlbumArtist => "xesam:albumArtist",
            Self::Artist => "xesam:artist",
            Self::AsText => "xesam:asText",
            Self::AudioBpm => "xesam:audioBPM",
            Self::AutoRating => "xesam:autoRating",
            Self::Comment => "xesam:comment",
            Self::Composer => "xesam:composer",
            Self::ContentCreated => "xesam:contentCreated",
            Self::DiscNumber => "xesam:discNumber",
            Self::FirstUsed => "xesam:firstUsed",
            Self::Genre => "xesam:genre",
            Self::LastUsed => "xesam:lastUsed",
            Self::Lyricist => "xesam:lyricist",
            Self::Title => "xesam:title",
            Self::TrackNumber => "xesam:trackNumber",
            Self::Url => "xesam:url",
            Self::UseCount => "xesam:useCount",
            Self::UserRating => "xesam:userRating",
        }
    }
}

/// Generates one typed accessor per optional field, for the record and the
/// cache alike.
macro_rules! optional_fields {
    ($accessor:ident) => {
        $accessor! {
            /// Artwork location, `mpris:artUrl`
            art_url: String => ArtUrl;
            /// Album name, `xesam:album`
            album: String => Album;
            /// Album artists, `xesam:albumArtist`
            album_artist: Vec<String> => AlbumArtist;
            /// Track artists, `xesam:artist`
            artist: Vec<String> => Artist;
            /// Lyrics, `xesam:asText`
            as_text: String => AsText;
            /// Beats per minute, `xesam:audioBPM`
            audio_bpm: i64 => AudioBpm;
            /// Automatic rating in `0.0..=1.0`, `xesam:autoRating`
            auto_rating: f64 => AutoRating;
            /// Free-form comments, `xesam:comment`
            comment: Vec<String> => Comment;
            /// Composers, `xesam:composer`
            composer: Vec<String> => Composer;
            /// Creation date, `xesam:contentCreated`
            content_created: String => ContentCreated;
            /// Disc number, `xesam:discNumber`
            disc_number: i64 => DiscNumber;
            /// First play date, `xesam:firstUsed`
            first_used: String => FirstUsed;
            /// Genres, `xesam:genre`
            genre: Vec<String> => Genre;
            /// Last play date, `xesam:lastUsed`
            last_used: String => LastUsed;
            /// Lyricists, `xesam:lyricist`
            lyricist: Vec<String> => Lyricist;
            /// Track title, `xesam:title`
            title: String => Title;
            /// Position on the album, `xesam:trackNumber`
            track_number: i64 => TrackNumber;
            /// Media location, `xesam:url`
            url: String => Url;
            /// Play count, `xesam:useCount`
            use_count: i64 => UseCount;
            /// User rating in `0.0..=1.0`, `xesam:userRating`
            user_rating: f64 => UserRating;
        }
    };
}

macro_rules! record_accessors {
    ($($(#[$doc:meta])* $name:ident: $ty:ty => $field:ident;)+) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            /// Returns `MprisError::MalformedMetadata` if the record has no
            /// track id and `MprisError::UnexpectedType` for a mistyped value
            pub fn $name(&self) -> Result<Option<$ty>, MprisError> {
                self.field(MetadataField::$field)
            }
        )+
    };
}

macro_rules! cache_accessors {
    ($($(#[$doc:meta])* $name:ident: $ty:ty => $field:ident;)+) => {
        $(
            $(#[$doc])*
            ///
            /// # Errors
            /// As the same accessor on [`MetadataRecord`]
            pub fn $name(&self) -> Result<Option<$ty>, MprisError> {
                self.snapshot().$name()
            }
        )+
    };
}

/// One track's metadata, as last announced by the player.
///
/// Optional fields that are absent read as `Ok(None)`, which is distinct
/// from a present but empty string or list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    fields: BTreeMap<String, PropertyValue>,
}

impl MetadataRecord {
    /// Build a record from already coerced fields.
    pub fn from_fields(fields: BTreeMap<String, PropertyValue>) -> Self {
        Self { fields }
    }

    /// Whether the player reported no fields at all, as it does when idle.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Raw value under any key, including non-standard ones.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.fields.get(key)
    }

    /// Every key present, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Track identity, `mpris:trackid`.
    ///
    /// # Errors
    /// Returns `MprisError::MalformedMetadata` if it is absent and
    /// `MprisError::UnexpectedType` if it is not a path or string
    pub fn track_id(&self) -> Result<String, MprisError> {
        let value = self.required()?;
        String::try_from(value).map_err(|source| MprisError::UnexpectedType {
            key: MetadataField::TrackId.key().to_string(),
            source,
        })
    }

    /// Track duration, `mpris:length`.
    ///
    /// # Errors
    /// Returns `MprisError::MalformedMetadata` if the record has no track
    /// id and `MprisError::UnexpectedType` for a non-integer length
    pub fn length(&self) -> Result<Option<Duration>, MprisError> {
        let micros: Option<i64> = self.field(MetadataField::Length)?;
        Ok(micros.map(from_mpris_micros))
    }

    optional_fields!(record_accessors);

    fn required(&self) -> Result<&PropertyValue, MprisError> {
        let key = MetadataField::TrackId.key();
        self.fields
            .get(key)
            .ok_or(MprisError::MalformedMetadata { key })
    }

    fn field<T>(&self, field: MetadataField) -> Result<Option<T>, MprisError>
    where
        T: for<'a> TryFrom<&'a PropertyValue, Error = CoercionError>,
    {
        self.required()?;
        self.fields
            .get(field.key())
            .map(T::try_from)
            .transpose()
            .map_err(|source| MprisError::UnexpectedType {
                key: field.key().to_string(),
                source,
            })
    }
}

impl TryFrom<PropertyValue> for MetadataRecord {
    type Error = CoercionError;

    fn try_from(value: PropertyValue) -> Result<Self, Self::Error> {
        match value {
            PropertyValue::Map(fields) => Ok(Self { fields }),
            other => Err(CoercionError::Mismatch {
                expected: "metadata map",
                found: other.kind(),
            }),
        }
    }
}

/// Local view of the bound player's current track.
///
/// Loaded once at bind time, then replaced whole from `Metadata` broadcasts.
/// Readers take [`snapshot`](Self::snapshot)s, so a reader never sees fields
/// from two different records.
#[derive(Debug, Clone)]
pub struct MetadataCache {
    record: Property<Arc<MetadataRecord>>,
    listeners: Arc<Mutex<Vec<mpsc::UnboundedSender<Arc<MetadataRecord>>>>>,
}

impl MetadataCache {
    /// A cache holding `record`.
    pub fn new(record: MetadataRecord) -> Self {
        Self {
            record: Property::new(Arc::new(record)),
            listeners: Arc::default(),
        }
    }

    /// Take the initial snapshot with a single `Metadata` read.
    ///
    /// # Errors
    /// Returns error if the read fails or the value is not a map
    #[instrument(skip(player), fields(destination = %player.binding().destination()))]
    pub async fn load(player: &PlayerBinding) -> Result<Self, MprisError> {
        let record = player.metadata().await?;
        debug!(fields = record.keys().count(), "Loaded initial metadata");
        Ok(Self::new(record))
    }

    /// Keep the cache in sync with `Metadata` broadcasts on `bus`.
    ///
    /// A value that is not a map leaves the current record in place.
    pub fn attach(&self, bus: &EventSubscriptionBus) {
        let record = self.record.clone();
        let listeners = Arc::clone(&self.listeners);
        bus.on_property_changed(Interface::Player, "Metadata", move |value| {
            match MetadataRecord::try_from(value.clone()) {
                Ok(next) => {
                    info!(
                        title = %next.title().ok().flatten().unwrap_or_default(),
                        "Track metadata changed"
                    );
                    let next = Arc::new(next);
                    record.replace(Arc::clone(&next));
                    listeners
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .retain(|listener| listener.send(Arc::clone(&next)).is_ok());
                }
                Err(e) => warn!(error = %e, "Ignoring malformed metadata broadcast"),
            }
        });
    }

    /// The current record. Later updates do not affect it.
    pub fn snapshot(&self) -> Arc<MetadataRecord> {
        self.record.get()
    }

    /// Stream of records, starting with the current one.
    ///
    /// Only the latest record is kept for a slow reader, so replacements that
    /// land between two polls are skipped. Use [`changes`](Self::changes) to
    /// see every one.
    pub fn watch(&self) -> impl Stream<Item = Arc<MetadataRecord>> + Send {
        self.record.watch()
    }

    /// Every record installed by a broadcast from now on, in arrival order.
    ///
    /// Nothing is dropped for a slow reader. The channel lives as long as the
    /// receiver does.
    pub fn changes(&self) -> mpsc::UnboundedReceiver<Arc<MetadataRecord>> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sender);
        receiver
    }

    /// Track identity of the current record.
    ///
    /// # Errors
    /// As [`MetadataRecord::track_id`]
    pub fn track_id(&self) -> Result<String, MprisError> {
        self.snapshot().track_id()
    }

    /// Duration of the current track.
    ///
    /// # Errors
    /// As [`MetadataRecord::length`]
    pub fn length(&self) -> Result<Option<Duration>, MprisError> {
        self.snapshot().length()
    }

    optional_fields!(cache_accessors);
}
