//! Generated stylesheet and the once-per-class injection guard.
//!
//! Hosts theme through the custom properties (`--{cls}-bg`, `--{cls}-fg`,
//! `--{cls}-muted`, `--{cls}-border`, `--{cls}-close-hover-bg`) instead of
//! touching the generated rules. The injection registry is process-wide,
//! initialized lazily on the first popup of a class name and never torn
//! down: stylesheets stay injected for the page lifetime even after the
//! last popup of that class is destroyed.

use std::collections::BTreeSet;
use std::sync::{Mutex, OnceLock};

use indoc::indoc;

use crate::chrome;

const TEMPLATE: &str = indoc! {r#"
    .{cls} {
        box-sizing: border-box;
        min-width: 240px;
        border-radius: 12px;
        box-shadow: 0 8px 28px rgba(0,0,0,0.2);
        overflow: hidden;
        border: 1px solid var(--{cls}-border, rgba(0,0,0,0.1));
        background: var(--{cls}-bg, #fff);
        color: var(--{cls}-fg, #1f2328);
    }
    .{cls}-dark {
        --{cls}-bg: #0d1117;
        --{cls}-fg: #e6edf3;
        --{cls}-muted: #9da7b3;
        --{cls}-border: rgba(255,255,255,0.12);
        --{cls}-close-hover-bg: rgba(255,255,255,0.12);
    }
    .{cls}-light {
        --{cls}-bg: #ffffff;
        --{cls}-fg: #1f2328;
        --{cls}-muted: #6e7781;
        --{cls}-border: rgba(0,0,0,0.12);
        --{cls}-close-hover-bg: rgba(127,127,127,0.12);
    }
    .{cls}__header {
        cursor: move;
        user-select: none;
        display: flex;
        align-items: center;
        justify-content: space-between;
        padding: 6px 10px;
        background: transparent;
        border-bottom: 1px solid var(--{cls}-border, rgba(0,0,0,0.08));
    }
    .{cls}__header--maximized {
        cursor: default;
    }
    .{cls}__header--shell-mac .{cls}__title {
        margin-left: {title_inset}px;
    }
    .{cls}__header--shell-win .{cls}__buttons {
        margin-right: {buttons_inset}px;
    }
    .{cls}__title {
        font-size: 14px;
        font-weight: 600;
        color: var(--{cls}-fg);
        flex: 1;
        overflow: hidden;
        white-space: nowrap;
        text-overflow: ellipsis;
    }
    .{cls}__buttons {
        display: flex;
        align-items: center;
        gap: 4px;
    }
    .{cls}__close,
    .{cls}__maximize {
        all: unset;
        cursor: pointer;
        font-size: 20px;
        line-height: 1;
        padding: 2px 6px;
        border-radius: 8px;
        color: var(--{cls}-muted);
        display: inline-flex;
        align-items: center;
        justify-content: center;
        min-width: 28px;
        height: 28px;
    }
    .{cls}__maximize {
        font-size: 16px;
    }
    .{cls}__close:hover,
    .{cls}__maximize:hover {
        background: var(--{cls}-close-hover-bg);
    }
    .{cls}__body {
        padding: 10px;
        overflow: auto;
    }
    .{cls} * { box-sizing: border-box; }
"#};

/// Build the stylesheet for a class name. The shell inset rules share
/// their values with the header metrics in [`crate::chrome`].
pub fn build(class_name: &str) -> String {
    TEMPLATE
        .replace("{cls}", class_name)
        .replace(
            "{title_inset}",
            &(chrome::SHELL_TITLE_INSET as i64).to_string(),
        )
        .replace(
            "{buttons_inset}",
            &(chrome::SHELL_BUTTONS_INSET as i64).to_string(),
        )
}

fn registry() -> &'static Mutex<BTreeSet<String>> {
    static INJECTED: OnceLock<Mutex<BTreeSet<String>>> = OnceLock::new();
    INJECTED.get_or_init(|| Mutex::new(BTreeSet::new()))
}

/// Claim injection for a class name. Returns the stylesheet on the first
/// claim in this process; every later claim for the same class name gets
/// `None` no matter which popup instance asks.
pub fn claim(class_name: &str) -> Option<String> {
    let mut injected = registry().lock().unwrap_or_else(|poisoned| {
        // the registry holds plain strings; a panic mid-insert cannot
        // leave it inconsistent
        poisoned.into_inner()
    });
    if injected.insert(class_name.to_string()) {
        tracing::debug!(class_name, "stylesheet injected");
        Some(build(class_name))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_scopes_everything_to_the_class_name() {
        let css = build("mypopup");
        assert!(css.contains(".mypopup__header--maximized"));
        assert!(css.contains("--mypopup-close-hover-bg"));
        assert!(css.contains(".mypopup__header--shell-mac .mypopup__title"));
        assert!(!css.contains("{cls}"));
    }

    #[test]
    fn shell_inset_rules_use_the_chrome_metrics() {
        let css = build("popup");
        assert!(css.contains(&format!(
            "margin-left: {}px",
            chrome::SHELL_TITLE_INSET as i64
        )));
        assert!(css.contains(&format!(
            "margin-right: {}px",
            chrome::SHELL_BUTTONS_INSET as i64
        )));
        assert!(!css.contains("{title_inset}"));
        assert!(!css.contains("{buttons_inset}"));
    }

    #[test]
    fn exposes_theme_override_points() {
        let css = build("popup");
        for prop in [
            "--popup-bg",
            "--popup-fg",
            "--popup-muted",
            "--popup-border",
            "--popup-close-hover-bg",
        ] {
            assert!(css.contains(prop), "missing override point {prop}");
        }
    }

    #[test]
    fn claim_yields_css_once_per_class_name() {
        // unique names: the registry is process-wide and never reset
        assert!(claim("claim-test-a").is_some());
        assert!(claim("claim-test-a").is_none());
        assert!(claim("claim-test-b").is_some());
    }
}
