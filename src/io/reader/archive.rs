/*! Annotated archive reader.

Archives are gzip-compressed, line-delimited JSON: one [Document] per
line, as produced by the annotation pipeline. A parse failure is fatal
for the archive (there is no recovery path for truncated input).
!*/
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::document::Document;
use crate::error::Error;

#[derive(Debug)]
pub struct Reader<T>
where
    T: Read,
{
    lines: Lines<BufReader<T>>,
}

pub type ArchiveReader = Reader<MultiGzDecoder<File>>;

impl ArchiveReader {
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
    type Item = Result<Document, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.lines.next()? {
            Ok(line) => Some(serde_json::from_str::<Document>(&line).map_err(Error::Serde)),
            Err(e) => Some(Err(Error::Io(e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn gen_data() -> String {
        let doc = r#"{
            "id": "12001121020008",
            "year": 2001,
            "content": {
                "language": "de",
                "tokens": [
                    {"position": 1, "zone": 61, "text": "Coop"},
                    {"position": 2, "zone": 61, "text": " "},
                    {"position": 3, "zone": 62, "text": "Verkäufer/in"}
                ]
            }
        }"#;

        let one_line: String = doc
            .lines()
            .map(|line| line.trim_matches(char::is_whitespace))
            .collect();
        let mut ret = String::new();
        for _ in 0..5 {
            ret.push_str(&one_line);
            ret.push('\n');
        }
        ret
    }

    #[test]
    fn test_all() {
        let reader = Reader::new(Cursor::new(gen_data()));
        let docs: Vec<_> = reader.collect();
        assert_eq!(docs.len(), 5);
        for doc in docs {
            let doc = doc.unwrap();
            assert_eq!(doc.year, 2001);
            assert_eq!(doc.tokens().len(), 3);
            assert_eq!(doc.tokens()[2].text, "Verkäufer/in");
        }
    }

    #[test]
    fn test_malformed_line_is_an_error() {
        let mut data = gen_data();
        data.push_str("{\"id\": truncated\n");
        let reader = Reader::new(Cursor::new(data));
        let results: Vec<_> = reader.collect();
        assert!(results.last().unwrap().is_err());
    }

    #[test]
    fn test_from_gzip_path() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ads_2001.jsonl.gz");
        let mut encoder = GzEncoder::new(File::create(&path).unwrap(), Compression::default());
        encoder.write_all(gen_data().as_bytes()).unwrap();
        encoder.finish().unwrap();

        let reader = ArchiveReader::from_path(&path).unwrap();
        assert_eq!(reader.count(), 5);
    }
}
