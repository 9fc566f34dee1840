use std::fmt;

/// Statistics from a completed bundle write
#[derive(Debug, Clone, Default)]
pub struct WriterStats {
    /// Rows (sources) written to each file
    pub rows_written: usize,
    /// Pixels per spectrum
    pub pixels_per_spectrum: usize,
    /// Row groups written across the three files
    pub row_groups_written: usize,
    /// Combined size of the three files in bytes
    pub total_size_bytes: u64,
}

impl fmt::Display for WriterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} sources ({} pixels each) in {} row groups, {} bytes",
            self.rows_written,
            self.pixels_per_spectrum,
            self.row_groups_written,
            self.total_size_bytes
        )
    }
}
