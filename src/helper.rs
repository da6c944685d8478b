// src/helper.rs
//
// URL building and display formatting used by response projection.

/// Turns stored media paths into fully qualified URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaUrls {
    base_url: String,
}

impl MediaUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Empty paths stay empty; absolute URLs pass through unchanged.
    pub fn full_url(&self, path: &str) -> String {
        let path = path.trim();
        if path.is_empty() {
            return String::new();
        }
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Formats a duration for display: `MM:SS`, or `H:MM:SS` from one hour up
pub fn format_duration_time(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url() {
        let urls = MediaUrls::new("https://cdn.example.com/");
        assert_eq!(urls.full_url("uploads/a.png"), "https://cdn.example.com/uploads/a.png");
        assert_eq!(urls.full_url("/uploads/a.png"), "https://cdn.example.com/uploads/a.png");
        assert_eq!(urls.full_url("http://other.net/b.png"), "http://other.net/b.png");
        assert_eq!(urls.full_url(""), "");
    }

    #[test]
    fn test_format_duration_time() {
        assert_eq!(format_duration_time(0), "00:00");
        assert_eq!(format_duration_time(75), "01:15");
        assert_eq!(format_duration_time(3599), "59:59");
        assert_eq!(format_duration_time(3600), "1:00:00");
        assert_eq!(format_duration_time(7322), "2:02:02");
    }
}
