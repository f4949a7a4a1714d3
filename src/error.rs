use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Directory spreadsheet is missing the sheet or a required column
    #[error("Directory format error: {0}")]
    DirectoryFormat(String),

    #[error("Spreadsheet read error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Page {index} out of range ({count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("Failed to write page {page}: {source}")]
    PageWrite {
        page: usize,
        #[source]
        source: Box<SplitError>,
    },

    #[error("Report export error: {0}")]
    Report(String),

    #[error("No files selected")]
    NoFilesSelected,

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Job not found: {0}")]
    JobNotFound(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SplitError>;
