use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::ScrapeError;

/// Column set of the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLayout {
    WithRatingCount,
    WithoutRatingCount,
}

impl RecordLayout {
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            RecordLayout::WithRatingCount => &[
                "title",
                "year",
                "cast",
                "director",
                "rating",
                "total_rating_count",
                "genres",
            ],
            RecordLayout::WithoutRatingCount => {
                &["title", "year", "cast", "director", "rating", "genres"]
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieRecord {
    pub title: String,
    pub year: String,
    pub cast: String,
    pub director: String,
    pub rating: String,
    pub genres: String,
    /// Only filled for `RecordLayout::WithRatingCount`.
    pub total_rating_count: Option<String>,
}

impl MovieRecord {
    pub fn to_row(&self, layout: RecordLayout) -> Vec<&str> {
        let mut row = vec![
            self.title.as_str(),
            self.year.as_str(),
            self.cast.as_str(),
            self.director.as_str(),
            self.rating.as_str(),
        ];
        if layout == RecordLayout::WithRatingCount {
            row.push(self.total_rating_count.as_deref().unwrap_or(""));
        }
        row.push(self.genres.as_str());
        row
    }
}

/// CSV sink that writes the header once and flushes after every row.
pub struct RecordWriter<W: Write> {
    writer: csv::Writer<W>,
    layout: RecordLayout,
}

impl RecordWriter<File> {
    /// Truncates `path`.
    pub fn create<P: AsRef<Path>>(path: P, layout: RecordLayout) -> Result<Self, ScrapeError> {
        let file = File::create(path)?;
        Self::new(file, layout)
    }
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, layout: RecordLayout) -> Result<Self, ScrapeError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(inner);
        writer.write_record(layout.headers())?;
        writer.flush()?;
        Ok(RecordWriter { writer, layout })
    }

    pub fn write(&mut self, record: &MovieRecord) -> Result<(), ScrapeError> {
        self.writer.write_record(record.to_row(self.layout))?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, ScrapeError> {
        self.writer
            .into_inner()
            .map_err(|e| ScrapeError::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MovieRecord {
        MovieRecord {
            title: "Amélie".into(),
            year: "2001".into(),
            cast: "Audrey Tautou, Mathieu Kassovitz".into(),
            director: "Jean-Pierre Jeunet".into(),
            rating: "4.05".into(),
            genres: "Comedy, Romance".into(),
            total_rating_count: Some("1,234,567".into()),
        }
    }

    fn written(layout: RecordLayout, records: &[MovieRecord]) -> String {
        let mut w = RecordWriter::new(Vec::new(), layout).unwrap();
        for r in records {
            w.write(r).unwrap();
        }
        String::from_utf8(w.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn full_layout_puts_rating_count_before_genres() {
        let out = written(RecordLayout::WithRatingCount, &[sample()]);
        let mut lines = out.lines();
        assert_eq!(
            lines.next(),
            Some("title,year,cast,director,rating,total_rating_count,genres")
        );
        assert_eq!(
            lines.next(),
            Some(r#"Amélie,2001,"Audrey Tautou, Mathieu Kassovitz",Jean-Pierre Jeunet,4.05,"1,234,567","Comedy, Romance""#)
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn reduced_layout_drops_rating_count() {
        let out = written(RecordLayout::WithoutRatingCount, &[sample()]);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("title,year,cast,director,rating,genres"));
        assert_eq!(
            lines.next(),
            Some(r#"Amélie,2001,"Audrey Tautou, Mathieu Kassovitz",Jean-Pierre Jeunet,4.05,"Comedy, Romance""#)
        );
    }

    #[test]
    fn rows_end_with_crlf() {
        let out = written(RecordLayout::WithoutRatingCount, &[sample()]);
        assert_eq!(out.matches("\r\n").count(), 2);
        assert!(out.ends_with("\"Comedy, Romance\"\r\n"));
        assert!(!out.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn missing_rating_count_writes_empty_cell() {
        let record = MovieRecord {
            title: "Koyaanisqatsi".into(),
            ..MovieRecord::default()
        };
        let out = written(RecordLayout::WithRatingCount, &[record]);
        assert_eq!(out.lines().nth(1), Some("Koyaanisqatsi,,,,,,"));
    }

    #[test]
    fn header_is_written_even_without_rows() {
        let out = written(RecordLayout::WithoutRatingCount, &[]);
        assert_eq!(out, "title,year,cast,director,rating,genres\r\n");
    }
}
