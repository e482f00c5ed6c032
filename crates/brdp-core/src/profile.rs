//! RDP connection-profile construction.
//!
//! [`emit_profile`] builds the ordered directive list for one session: a
//! fixed base block, a display block, five subprotocol-gated redirection
//! blocks, an optional remote-application block, and the trailing
//! host/username pair. The trailing pair must come last; everything else
//! follows construction order, which is deterministic.

use std::fmt;

use crate::rights::{
    RemoteApp, Subprotocols, RDP_CLIPBOARD_DOWN, RDP_CLIPBOARD_FILE, RDP_CLIPBOARD_UP,
    RDP_COM_PORT, RDP_DRIVE, RDP_PRINTER, RDP_SMARTCARD,
};

/// Desktop width used when no resolution mode is given.
pub const DEFAULT_WIDTH: u32 = 1024;
/// Desktop height used when no resolution mode is given.
pub const DEFAULT_HEIGHT: u32 = 768;
/// Default session color depth in bits per pixel.
pub const DEFAULT_COLOR_DEPTH: u8 = 32;
/// Color depths the RDP client accepts.
pub const COLOR_DEPTHS: [u8; 5] = [8, 15, 16, 24, 32];

/// Program prefix the gateway's broker matches for published applications.
/// Protocol constant, not branding.
pub const REMOTE_APP_PREFIX: &str = "||WABRemoteApp";

/// Screen behavior of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// Fixed-size window; width/height taken from the parameters.
    #[default]
    Windowed,
    /// Fullscreen on one monitor.
    Fullscreen,
    /// Span all monitors.
    Multimonitor,
}

impl Resolution {
    /// Parse a resolution-mode string. Anything other than the two named
    /// modes (including the empty string) falls back to windowed.
    pub fn parse(value: &str) -> Self {
        match value {
            "fullscreen" => Resolution::Fullscreen,
            "multimonitor" => Resolution::Multimonitor,
            _ => Resolution::Windowed,
        }
    }
}

/// Session display/input parameters, validated by the caller.
#[derive(Debug, Clone)]
pub struct ConnectionParameters {
    /// Color depth in bits per pixel, one of [`COLOR_DEPTHS`].
    pub color_depth: u8,
    /// Screen behavior.
    pub resolution: Resolution,
    /// Desktop width, used only under [`Resolution::Windowed`].
    pub width: u32,
    /// Desktop height, used only under [`Resolution::Windowed`].
    pub height: u32,
}

impl Default for ConnectionParameters {
    fn default() -> Self {
        Self {
            color_depth: DEFAULT_COLOR_DEPTH,
            resolution: Resolution::Windowed,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

/// Typed value of one profile directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveValue {
    /// Integer flag, rendered with type code `i`.
    Int(i64),
    /// String value, rendered with type code `s`.
    Str(String),
}

/// One `name:type:value` line of the connection profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Directive name as the RDP client spells it.
    pub name: &'static str,
    /// Typed value.
    pub value: DirectiveValue,
}

impl Directive {
    /// Integer directive, `name:i:value`.
    pub fn int(name: &'static str, value: i64) -> Self {
        Self {
            name,
            value: DirectiveValue::Int(value),
        }
    }

    /// String directive, `name:s:value`.
    pub fn str(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: DirectiveValue::Str(value.into()),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            DirectiveValue::Int(v) => write!(f, "{}:i:{}", self.name, v),
            DirectiveValue::Str(v) => write!(f, "{}:s:{}", self.name, v),
        }
    }
}

/// Build the ordered directive list for one session.
///
/// `username` is the resolved target string (see
/// [`crate::rights::resolve_target`]), not the raw login — the gateway reads
/// the routing key out of the profile's username field. `host` is the bastion
/// address. The host and username directives are always the final two lines,
/// in that order.
///
/// The remote-application block is emitted only when `remote_app_mode` is set
/// and `app_common_name` is non-empty; the program directive's `:program`
/// suffix additionally requires a [`RemoteApp`] spec.
pub fn emit_profile(
    params: &ConnectionParameters,
    username: &str,
    host: &str,
    subprotocols: &Subprotocols,
    app_common_name: Option<&str>,
    remote_app: Option<&RemoteApp>,
    remote_app_mode: bool,
) -> Vec<Directive> {
    let mut lines = vec![
        Directive::int("screen mode id", 1),
        Directive::int("session bpp", i64::from(params.color_depth)),
        Directive::int("auto connect", 1),
        Directive::int("compression", 1),
        Directive::int("keyboardhook", 2),
        Directive::int("audiomode", 2),
        Directive::int("displayconnectionbar", 1),
        Directive::str("alternate shell", ""),
        Directive::str("shell working directory", ""),
        Directive::int("disable wallpaper", 1),
        Directive::int("disable full window drag", 1),
        Directive::int("disable menu anims", 1),
        Directive::int("disable themes", 1),
        Directive::int("bitmapcachepersistenable", 1),
        Directive::int("prompt for credentials", 1),
    ];

    // Display block: exactly one of the three shapes.
    match params.resolution {
        Resolution::Fullscreen => {
            lines.push(Directive::int("screen mode id", 2));
            lines.push(Directive::int("multimon", 0));
        }
        Resolution::Multimonitor => {
            lines.push(Directive::int("use multimon", 1));
        }
        Resolution::Windowed => {
            lines.push(Directive::int("desktopwidth", i64::from(params.width)));
            lines.push(Directive::int("desktopheight", i64::from(params.height)));
            lines.push(Directive::int("use multimon", 0));
        }
    }

    // Redirection blocks: five independent yes/no decisions.
    let drives = subprotocols.allows_any(&[RDP_DRIVE]);
    lines.push(Directive::int("redirectdrives", i64::from(drives)));
    lines.push(Directive::str("drivestoredirect", if drives { "*" } else { "" }));

    let printers = subprotocols.allows_any(&[RDP_PRINTER]);
    lines.push(Directive::int("redirectprinters", i64::from(printers)));

    let clipboard =
        subprotocols.allows_any(&[RDP_CLIPBOARD_UP, RDP_CLIPBOARD_DOWN, RDP_CLIPBOARD_FILE]);
    lines.push(Directive::int("redirectclipboard", i64::from(clipboard)));

    let com_ports = subprotocols.allows_any(&[RDP_COM_PORT]);
    lines.push(Directive::int("redirectcomports", i64::from(com_ports)));

    let smartcards = subprotocols.allows_any(&[RDP_SMARTCARD]);
    lines.push(Directive::int("redirectsmartcards", i64::from(smartcards)));

    // Remote-application block.
    if remote_app_mode && app_common_name.is_some_and(|cn| !cn.is_empty()) {
        lines.push(Directive::int("remoteapplicationmode", 1));
        if let Some(app) = remote_app {
            lines.push(Directive::str("loadbalanceinfo", app.token.clone()));
        }
        let program = match remote_app {
            Some(app) => format!("{REMOTE_APP_PREFIX}:{}", app.program),
            None => REMOTE_APP_PREFIX.to_string(),
        };
        lines.push(Directive::str("remoteapplicationprogram", program));
    }

    // Trailing pair, always last.
    lines.push(Directive::str("full address", host));
    lines.push(Directive::str("username", username));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rights::WILDCARD;

    fn render(lines: &[Directive]) -> Vec<String> {
        lines.iter().map(|d| d.to_string()).collect()
    }

    fn emit(params: &ConnectionParameters, subs: &Subprotocols) -> Vec<String> {
        render(&emit_profile(
            params,
            "bob@CORP@srv01:RDP:alice",
            "bastion.example.com",
            subs,
            None,
            None,
            false,
        ))
    }

    #[test]
    fn directive_rendering() {
        assert_eq!(Directive::int("compression", 1).to_string(), "compression:i:1");
        assert_eq!(
            Directive::str("alternate shell", "").to_string(),
            "alternate shell:s:"
        );
    }

    #[test]
    fn fullscreen_never_emits_dimensions() {
        let params = ConnectionParameters {
            resolution: Resolution::Fullscreen,
            ..Default::default()
        };
        let lines = emit(&params, &Subprotocols::default());
        assert!(lines.contains(&"screen mode id:i:2".to_string()));
        assert!(lines.contains(&"multimon:i:0".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("desktopwidth")));
        assert!(!lines.iter().any(|l| l.starts_with("desktopheight")));
    }

    #[test]
    fn multimonitor_never_emits_dimensions() {
        let params = ConnectionParameters {
            resolution: Resolution::Multimonitor,
            ..Default::default()
        };
        let lines = emit(&params, &Subprotocols::default());
        assert!(lines.contains(&"use multimon:i:1".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("desktopwidth")));
    }

    #[test]
    fn windowed_emits_both_dimensions() {
        let params = ConnectionParameters {
            width: 1920,
            height: 1080,
            ..Default::default()
        };
        let lines = emit(&params, &Subprotocols::default());
        assert!(lines.contains(&"desktopwidth:i:1920".to_string()));
        assert!(lines.contains(&"desktopheight:i:1080".to_string()));
        assert!(lines.contains(&"use multimon:i:0".to_string()));
    }

    #[test]
    fn wildcard_enables_all_redirections() {
        let subs = Subprotocols::from_tags([WILDCARD]);
        let lines = emit(&ConnectionParameters::default(), &subs);
        assert!(lines.contains(&"redirectdrives:i:1".to_string()));
        assert!(lines.contains(&"drivestoredirect:s:*".to_string()));
        assert!(lines.contains(&"redirectprinters:i:1".to_string()));
        assert!(lines.contains(&"redirectclipboard:i:1".to_string()));
        assert!(lines.contains(&"redirectcomports:i:1".to_string()));
        assert!(lines.contains(&"redirectsmartcards:i:1".to_string()));
    }

    #[test]
    fn empty_subprotocols_disable_all_redirections() {
        let lines = emit(&ConnectionParameters::default(), &Subprotocols::default());
        assert!(lines.contains(&"redirectdrives:i:0".to_string()));
        assert!(lines.contains(&"drivestoredirect:s:".to_string()));
        assert!(lines.contains(&"redirectprinters:i:0".to_string()));
        assert!(lines.contains(&"redirectclipboard:i:0".to_string()));
        assert!(lines.contains(&"redirectcomports:i:0".to_string()));
        assert!(lines.contains(&"redirectsmartcards:i:0".to_string()));
    }

    #[test]
    fn any_clipboard_tag_enables_clipboard() {
        for tag in ["RDP_CLIPBOARD_UP", "RDP_CLIPBOARD_DOWN", "RDP_CLIPBOARD_FILE"] {
            let subs = Subprotocols::from_tags([tag]);
            let lines = emit(&ConnectionParameters::default(), &subs);
            assert!(lines.contains(&"redirectclipboard:i:1".to_string()), "tag {tag}");
        }
    }

    #[test]
    fn host_and_username_are_final_lines() {
        let lines = emit(&ConnectionParameters::default(), &Subprotocols::default());
        let n = lines.len();
        assert_eq!(lines[n - 2], "full address:s:bastion.example.com");
        assert_eq!(lines[n - 1], "username:s:bob@CORP@srv01:RDP:alice");
    }

    #[test]
    fn remote_app_without_spec_emits_bare_prefix() {
        let lines = render(&emit_profile(
            &ConnectionParameters::default(),
            "target",
            "host",
            &Subprotocols::default(),
            Some("app1"),
            None,
            true,
        ));
        assert!(lines.contains(&"remoteapplicationmode:i:1".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("loadbalanceinfo")));
        assert!(lines.contains(&"remoteapplicationprogram:s:||WABRemoteApp".to_string()));
    }

    #[test]
    fn remote_app_with_spec_emits_token_and_suffix() {
        let app = RemoteApp {
            token: "Cookie: mstshash=app1".to_string(),
            program: "app1".to_string(),
        };
        let lines = render(&emit_profile(
            &ConnectionParameters::default(),
            "target",
            "host",
            &Subprotocols::default(),
            Some("app1"),
            Some(&app),
            true,
        ));
        assert!(lines.contains(&"loadbalanceinfo:s:Cookie: mstshash=app1".to_string()));
        assert!(lines.contains(&"remoteapplicationprogram:s:||WABRemoteApp:app1".to_string()));
    }

    #[test]
    fn remote_app_block_requires_common_name() {
        // Mode flag alone is not enough: an empty or absent common name
        // suppresses the whole block.
        for cn in [None, Some("")] {
            let lines = render(&emit_profile(
                &ConnectionParameters::default(),
                "target",
                "host",
                &Subprotocols::default(),
                cn,
                None,
                true,
            ));
            assert!(!lines.iter().any(|l| l.starts_with("remoteapplication")));
        }
    }

    #[test]
    fn remote_app_block_requires_mode_flag() {
        let app = RemoteApp {
            token: "t".to_string(),
            program: "p".to_string(),
        };
        let lines = render(&emit_profile(
            &ConnectionParameters::default(),
            "target",
            "host",
            &Subprotocols::default(),
            Some("app1"),
            Some(&app),
            false,
        ));
        assert!(!lines.iter().any(|l| l.starts_with("remoteapplication")));
        assert!(!lines.iter().any(|l| l.starts_with("loadbalanceinfo")));
    }

    #[test]
    fn resolution_parse_falls_back_to_windowed() {
        assert_eq!(Resolution::parse("fullscreen"), Resolution::Fullscreen);
        assert_eq!(Resolution::parse("multimonitor"), Resolution::Multimonitor);
        assert_eq!(Resolution::parse(""), Resolution::Windowed);
        assert_eq!(Resolution::parse("1080p"), Resolution::Windowed);
    }

    #[test]
    fn session_bpp_follows_color_depth() {
        let params = ConnectionParameters {
            color_depth: 16,
            ..Default::default()
        };
        let lines = emit(&params, &Subprotocols::default());
        assert!(lines.contains(&"session bpp:i:16".to_string()));
    }
}
