//! Progress bar utilities for CLI operations

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for a batch of items
///
/// The bar draws to stderr and hides itself when stderr is not a terminal,
/// so batch runs under redirection stay quiet.
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Invalid progress bar template")
            .progress_chars("#>-"),
    );
    pb.set_message(message.to_string());
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_progress_bar() {
        let pb = create_progress_bar(100, "Resolving identifiers");
        assert_eq!(pb.length(), Some(100));
        pb.finish_and_clear();
    }
}
