//! File-export contract: hand bytes to the platform's save action.

/// Browser-side save. No failure is reported back to the caller.
pub trait FileExport: Send + Sync {
    fn download(&self, bytes: &[u8], mime_type: &str, filename: &str);
}
