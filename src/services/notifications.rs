//! Desktop notifications for action results.

use std::collections::HashMap;

use tracing::{debug, warn};
use zbus::{Connection, proxy, zvariant::Value};

use crate::config::NotificationsConfig;

const APP_NAME: &str = "mpris-remote";

/// `org.freedesktop.Notifications` proxy, just the call we need
#[allow(clippy::too_many_arguments)]
#[proxy(
    interface = "org.freedesktop.Notifications",
    default_service = "org.freedesktop.Notifications",
    default_path = "/org/freedesktop/Notifications"
)]
pub trait Notifications {
    /// Show a notification, returning its id
    fn notify(
        &self,
        app_name: &str,
        replaces_id: u32,
        app_icon: &str,
        summary: &str,
        body: &str,
        actions: &[&str],
        hints: &HashMap<&str, &Value<'_>>,
        expire_timeout: i32,
    ) -> zbus::Result<u32>;
}

/// Sends short notices to the desktop notification daemon.
///
/// Every failure is logged and swallowed: a missing daemon never fails an
/// action that already succeeded.
pub struct DesktopNotifier {
    proxy: Option<NotificationsProxy<'static>>,
    timeout_ms: i32,
}

impl DesktopNotifier {
    /// Connect to the notification daemon, or a no-op notifier if
    /// notifications are disabled or the daemon cannot be reached.
    pub async fn connect(config: &NotificationsConfig) -> Self {
        let proxy = if config.enabled {
            match Self::proxy().await {
                Ok(proxy) => Some(proxy),
                Err(e) => {
                    warn!(error = %e, "Notification daemon unavailable");
                    None
                }
            }
        } else {
            None
        };

        Self {
            proxy,
            timeout_ms: config.timeout_ms,
        }
    }

    /// A notifier that drops every notice.
    pub fn disabled() -> Self {
        Self {
            proxy: None,
            timeout_ms: -1,
        }
    }

    async fn proxy() -> zbus::Result<NotificationsProxy<'static>> {
        let connection = Connection::session().await?;
        NotificationsProxy::new(&connection).await
    }

    /// Whether notices reach a daemon.
    pub fn is_enabled(&self) -> bool {
        self.proxy.is_some()
    }

    /// Show `message` under the player's name and icon.
    pub async fn notify(&self, identity: &str, player_id: &str, message: &str) {
        let Some(proxy) = &self.proxy else {
            return;
        };

        let body = markup(message);
        match proxy
            .notify(
                APP_NAME,
                0,
                player_id,
                identity,
                &body,
                &[],
                &HashMap::new(),
                self.timeout_ms,
            )
            .await
        {
            Ok(id) => debug!(id, notice = %message, "Notification shown"),
            Err(e) => warn!(error = %e, notice = %message, "Cannot show notification"),
        }
    }
}

fn markup(message: &str) -> String {
    format!("<b>{}</b>", escape(message))
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_bold() {
        assert_eq!(markup("Next song"), "<b>Next song</b>");
    }

    #[test]
    fn markup_characters_are_escaped() {
        assert_eq!(markup("Tom & Jerry <live>"), "<b>Tom &amp; Jerry &lt;live&gt;</b>");
    }

    #[test]
    fn disabled_notifier_is_silent() {
        assert!(!DesktopNotifier::disabled().is_enabled());
    }

    #[tokio::test]
    async fn config_can_turn_notices_off() {
        let config = NotificationsConfig {
            enabled: false,
            ..NotificationsConfig::default()
        };
        assert!(!DesktopNotifier::connect(&config).await.is_enabled());
    }
}
