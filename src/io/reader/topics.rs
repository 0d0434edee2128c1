/*! Topic-assignment reader.

The topic model emits gzip-compressed, line-delimited JSON records
`{"id": ..., "topics": [{"t": ..., "p": ...}]}` with topics in model
order. An ad's dominant topic is the first entry whose share clears the
threshold, not the arg-max.
!*/
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicWeight {
    pub t: u32,
    pub p: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
    pub id: String,
    pub topics: Vec<TopicWeight>,
}

impl TopicRecord {
    /// First topic whose share strictly exceeds `share_threshold`.
    pub fn dominant_topic(&self, share_threshold: f64) -> Option<u32> {
        self.topics
            .iter()
            .find(|weight| weight.p > share_threshold)
            .map(|weight| weight.t)
    }
}

#[derive(Debug)]
pub struct Reader<T>
where
    T: Read,
{
    lines: Lines<BufReader<T>>,
}

pub type TopicReader = Reader<MultiGzDecoder<File>>;

impl TopicReader {
    pub fn from_path(src: &Path) -> Result<Self, Error> {
        let handle = File::open(src)?;
        Ok(Self::new(MultiGzDecoder::new(handle)))
    }
}

impl<T> Reader<T>
where
    T: Read,
{
    pub fn new(handle: T) -> Self {
        Self {
            lines: BufReader::new(handle).lines(),
        }
    }
}

impl<T> Iterator for Reader<T>
where
    T: Read,
{
    type Item = Result<TopicRecord, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.lines.next()? {
            Ok(line) => Some(serde_json::from_str::<TopicRecord>(&line).map_err(Error::Serde)),
            Err(e) => Some(Err(Error::Io(e))),
        }
    }
}

/// Resolve the whole topic store into an id → dominant topic map.
///
/// Ads without any topic above the threshold are simply absent from the
/// map (no dominant topic, never eligible).
pub fn load_topic_map(src: &Path, share_threshold: f64) -> Result<HashMap<String, u32>, Error> {
    let mut map = HashMap::new();
    for record in TopicReader::from_path(src)? {
        let record = record?;
        if let Some(topic) = record.dominant_topic(share_threshold) {
            map.insert(record.id, topic);
        }
    }
    info!("resolved dominant topics for {} ads", map.len());
    Ok(map)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn record(weights: &[(u32, f64)]) -> TopicRecord {
        TopicRecord {
            id: "sjmm-1".to_string(),
            topics: weights
                .iter()
                .map(|(t, p)| TopicWeight { t: *t, p: *p })
                .collect(),
        }
    }

    #[test]
    fn test_first_above_threshold_wins() {
        // 2 comes after 5 but is the first to clear 0.4
        let r = record(&[(5, 0.3), (2, 0.5)]);
        assert_eq!(r.dominant_topic(0.4), Some(2));
    }

    #[test]
    fn test_list_order_beats_argmax() {
        // 5 clears the threshold first, even though 2 has a higher share
        let r = record(&[(5, 0.41), (2, 0.5)]);
        assert_eq!(r.dominant_topic(0.4), Some(5));
    }

    #[test]
    fn test_threshold_is_strict() {
        let r = record(&[(5, 0.4)]);
        assert_eq!(r.dominant_topic(0.4), None);
    }

    #[test]
    fn test_no_topic_above_threshold() {
        let r = record(&[(5, 0.1), (2, 0.2)]);
        assert_eq!(r.dominant_topic(0.4), None);
    }

    #[test]
    fn test_reader() {
        let data = concat!(
            r#"{"id": "sjmm-1", "topics": [{"t": 5, "p": 0.3}, {"t": 2, "p": 0.5}]}"#,
            "\n",
            r#"{"id": "sjmm-2", "topics": [{"t": 7, "p": 0.1}]}"#,
            "\n"
        );
        let records: Vec<_> = Reader::new(Cursor::new(data))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].dominant_topic(0.4), Some(2));
        assert_eq!(records[1].dominant_topic(0.4), None);
    }

    #[test]
    fn test_load_topic_map() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topics.jsonl.gz");
        let data = concat!(
            r#"{"id": "sjmm-1", "topics": [{"t": 5, "p": 0.3}, {"t": 2, "p": 0.5}]}"#,
            "\n",
            r#"{"id": "sjmm-2", "topics": [{"t": 7, "p": 0.1}]}"#,
            "\n"
        );
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(data.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let map = load_topic_map(&path, 0.4).unwrap();
        assert_eq!(map.get("sjmm-1"), Some(&2));
        assert_eq!(map.get("sjmm-2"), None);
    }
}
