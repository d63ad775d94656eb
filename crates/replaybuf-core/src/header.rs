use std::time::SystemTime;

/// An HTTP header as a name-value pair.
///
/// Buffered headers are never merged: two entries with the same name are
/// both recorded and both replayed. Whether the later one wins is decided
/// by the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A header whose value is a point in time (e.g. `Expires`,
/// `Last-Modified`). Formatting the date is left to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateHeader {
    pub name: String,
    pub date: SystemTime,
}

impl DateHeader {
    pub fn new(name: impl Into<String>, date: SystemTime) -> Self {
        Self {
            name: name.into(),
            date,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn header_new() {
        let h = Header::new("Content-Type", "application/json");
        assert_eq!(h.name, "Content-Type");
        assert_eq!(h.value, "application/json");
    }

    #[test]
    fn date_header_new() {
        let date = SystemTime::UNIX_EPOCH + Duration::from_secs(784_111_777);
        let h = DateHeader::new("Expires", date);
        assert_eq!(h.name, "Expires");
        assert_eq!(h.date, date);
    }
}
