use std::io::BufRead;

use serde_json::Value;

use crate::error::{Error, Result};

/// A decoded JSONL record: one JSON object per line.
pub type Record = serde_json::Map<String, Value>;

/// Streaming reader over line-delimited JSON.
///
/// Yields one decoded object per non-blank line, in file order. A line that
/// fails to decode (or decodes to something other than an object) ends the
/// sequence with `Error::MalformedRecord`; a corrupt line means a corrupt
/// archive, so the file must not be partially imported. Reads line by line
/// and never buffers the whole file.
pub struct JsonlReader<R: BufRead> {
    reader: R,
    source: String,
    line_no: u64,
    done: bool,
}

impl<R: BufRead> JsonlReader<R> {
    /// `source` identifies the member being read and is carried in errors.
    pub fn new(reader: R, source: impl Into<String>) -> Self {
        Self {
            reader,
            source: source.into(),
            line_no: 0,
            done: false,
        }
    }

    fn malformed(&self, message: impl Into<String>) -> Error {
        Error::MalformedRecord {
            file: self.source.clone(),
            line: self.line_no,
            message: message.into(),
        }
    }
}

impl<R: BufRead> Iterator for JsonlReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = String::new();
        loop {
            buf.clear();
            self.line_no += 1;

            match self.reader.read_line(&mut buf) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }

            let line = buf.trim();
            if line.is_empty() {
                continue;
            }

            return match serde_json::from_str::<Value>(line) {
                Ok(Value::Object(record)) => Some(Ok(record)),
                Ok(_) => {
                    self.done = true;
                    Some(Err(self.malformed("expected a JSON object")))
                }
                Err(e) => {
                    self.done = true;
                    Some(Err(self.malformed(e.to_string())))
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read_all(input: &str) -> Vec<Result<Record>> {
        JsonlReader::new(Cursor::new(input.to_string()), "test.jsonl").collect()
    }

    #[test]
    fn test_yields_one_record_per_line_in_order() {
        let input = "{\"_key\": 1}\n\n{\"_key\": 2}\n   \n{\"_key\": 3}\n";
        let records = read_all(input);

        assert_eq!(records.len(), 3);
        for (i, record) in records.into_iter().enumerate() {
            let record = record.unwrap();
            assert_eq!(record["_key"].as_i64(), Some(i as i64 + 1));
        }
    }

    #[test]
    fn test_blank_only_input_yields_nothing() {
        assert!(read_all("\n  \n\t\n").is_empty());
    }

    #[test]
    fn test_malformed_line_is_fatal() {
        let input = "{\"_key\": 1}\n{not json\n{\"_key\": 3}\n";
        let mut reader = JsonlReader::new(Cursor::new(input.to_string()), "bad.jsonl");

        assert!(reader.next().unwrap().is_ok());

        match reader.next().unwrap() {
            Err(Error::MalformedRecord { file, line, .. }) => {
                assert_eq!(file, "bad.jsonl");
                assert_eq!(line, 2);
            }
            other => panic!("expected MalformedRecord, got {:?}", other.map(|_| ())),
        }

        // Sequence fuses after the failure; nothing is silently dropped later.
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_non_object_line_is_malformed() {
        let mut reader = JsonlReader::new(Cursor::new("[1, 2, 3]\n".to_string()), "arr.jsonl");
        assert!(matches!(
            reader.next().unwrap(),
            Err(Error::MalformedRecord { .. })
        ));
    }
}
