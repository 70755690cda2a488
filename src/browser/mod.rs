use anyhow::{bail, Context, Result};

/// Open the published portfolio page in the user's default browser
///
/// # Arguments
/// * `url` - The page URL (the `site_url` setting)
///
/// # Errors
/// Returns error if the URL is not http(s) or no browser could be opened
pub fn open_site(url: &str) -> Result<()> {
    if !crate::edit::validation::is_http_url(url) {
        bail!("Refusing to open '{}': not an http(s) URL", url);
    }
    webbrowser::open(url).with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}
