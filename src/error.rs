use std::fmt;

#[derive(Debug)]
pub enum PerfError {
    Catalog(String),
    Solution(String),
    Csv(Box<csv::Error>),
    Io(std::io::Error),
    Other(String),
}

impl fmt::Display for PerfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PerfError::Catalog(e) => write!(f, "Catalog error: {}", e),
            PerfError::Solution(e) => write!(f, "Solution error: {}", e),
            PerfError::Csv(e) => write!(f, "CSV error: {}", e),
            PerfError::Io(e) => write!(f, "IO error: {}", e),
            PerfError::Other(e) => write!(f, "Error: {}", e),
        }
    }
}

impl std::error::Error for PerfError {}

impl From<csv::Error> for PerfError {
    fn from(err: csv::Error) -> Self {
        PerfError::Csv(Box::new(err))
    }
}

impl From<Box<csv::Error>> for PerfError {
    fn from(err: Box<csv::Error>) -> Self {
        PerfError::Csv(err)
    }
}

impl From<std::io::Error> for PerfError {
    fn from(err: std::io::Error) -> Self {
        PerfError::Io(err)
    }
}

impl From<String> for PerfError {
    fn from(err: String) -> Self {
        PerfError::Other(err)
    }
}

impl From<&str> for PerfError {
    fn from(err: &str) -> Self {
        PerfError::Other(err.to_string())
    }
}
