//! Check command handler.
//!
//! Runs the resolver once and prints what it found. Nothing is downloaded.

use anyhow::Result;
use gecko_core::UpdateCheck;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Execute the check command.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let check = ctx.resolver.fetch().await.map_err(CliError::from)?;
    println!("{}", describe(&check));
    Ok(())
}

/// One-paragraph summary of a resolution.
pub fn describe(check: &UpdateCheck) -> String {
    match check {
        UpdateCheck::Available(download) => {
            let mut text = format!(
                "Driver {} is available.\n  Download: {}",
                download.version, download.url
            );
            if let Some(details) = &download.details_url {
                text.push_str(&format!("\n  Details:  {details}"));
            }
            text
        }
        UpdateCheck::UpToDate { installed, latest } => {
            format!("Driver {installed} is up to date (latest is {latest}).")
        }
        UpdateCheck::Skipped(reason) => format!("No update check possible: {reason}."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gecko_core::{DriverDownload, SkipReason, Version};
    use url::Url;

    #[test]
    fn describes_available_driver_with_details() {
        let download = DriverDownload::new(
            Url::parse("https://us.download.nvidia.com/Windows/592.00/592.00-desktop.exe").unwrap(),
            "592.00",
            Some(Url::parse("https://www.nvidia.com/download/driverResults.aspx/1/").unwrap()),
        );

        let text = describe(&UpdateCheck::Available(download));
        assert!(text.starts_with("Driver 592.00 is available."));
        assert!(text.contains("592.00-desktop.exe"));
        assert!(text.contains("driverResults.aspx"));
    }

    #[test]
    fn describes_up_to_date() {
        let text = describe(&UpdateCheck::UpToDate {
            installed: Version::new(592, 0),
            latest: Version::new(591, 44),
        });
        assert_eq!(text, "Driver 592.0 is up to date (latest is 591.44).");
    }

    #[test]
    fn describes_skip_reason() {
        let text = describe(&UpdateCheck::Skipped(SkipReason::MissingGpu));
        assert_eq!(text, "No update check possible: no NVIDIA GPU detected.");
    }
}
