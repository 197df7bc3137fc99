//! Project validation.
//!
//! Config-level checks (quality range, converter availability) already ran
//! during config load; this command adds the deeper checks: the template
//! placeholder contract and the manifest location.

use anyhow::Result;
use std::fs;

use crate::{
    card::template::{self, PLACEHOLDERS},
    config::{ConfigDiagnostics, OgConfig},
    log,
};

/// Validate the project: template contract and manifest presence.
pub fn validate_project(config: &OgConfig) -> Result<()> {
    let mut diag = ConfigDiagnostics::new();

    validate_template(config, &mut diag);

    if !config.build.manifest.exists() {
        log!(
            "validate";
            "note: page manifest {} not found yet (the site build emits it)",
            config.root_relative(&config.build.manifest).display()
        );
    }

    if diag.has_errors() {
        eprintln!("{diag}");
        std::process::exit(1);
    }

    log!("validate"; "no problems found");
    Ok(())
}

/// Check that the template exists and carries all three placeholders.
fn validate_template(config: &OgConfig, diag: &mut ConfigDiagnostics) {
    let path = &config.card.template;

    let Ok(source) = fs::read_to_string(path) else {
        diag.error_with_hint(
            "card.template",
            format!("cannot read '{}'", path.display()),
            "run `ogcard init` to create a default template",
        );
        return;
    };

    for name in PLACEHOLDERS {
        if !template::has_placeholder(&source, name) {
            diag.error(
                "card.template",
                format!("missing the {{{{{name}}}}} placeholder"),
            );
        }
    }
}
