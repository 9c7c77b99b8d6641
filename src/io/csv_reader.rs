use std::{
    io::{BufRead, Lines},
    path::PathBuf,
};

use crate::{
    errors::{Error, Result},
    graph::{Node, Weight},
};

macro_rules! raise_error_unless {
    ($reader : expr, $cond : expr, $reason : expr) => {
        if !($cond) {
            return Err($reader.error($reason));
        }
    };
}

macro_rules! parse_next_value {
    ($reader : expr, $fields : expr, $name : expr) => {{
        let next = $fields.next();
        raise_error_unless!(
            $reader,
            next.is_some(),
            format!("premature end of row when parsing {}", $name)
        );

        match next.unwrap_or_default().trim().parse() {
            Ok(value) => value,
            Err(_) => return Err($reader.error(format!("cannot parse {}", $name))),
        }
    }};
}

/// Line-oriented reader for comma separated files. Keeps track of the current line for error
/// messages; an empty line ends the file. A line holding only whitespace is not empty and is
/// parsed like any other row.
pub struct RowReader<R> {
    lines: Lines<R>,
    path: PathBuf,
    line: usize,
}

impl<R: BufRead> RowReader<R> {
    /// `path` is only used to label errors
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            lines: reader.lines(),
            path: path.into(),
            line: 0,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn error(&self, reason: impl Into<String>) -> Error {
        self.error_at(self.line, reason)
    }

    /// Error for a row read earlier
    pub fn error_at(&self, line: usize, reason: impl Into<String>) -> Error {
        Error::malformed(self.path.clone(), line, reason)
    }

    /// Consumes the header line; its content is not checked
    pub fn skip_header(&mut self) -> Result<()> {
        raise_error_unless!(self, self.next_line()?.is_some(), "missing header line");
        Ok(())
    }

    /// Returns the next row, or `None` at the end of the file or at the first empty line
    pub fn next_row(&mut self) -> Result<Option<String>> {
        Ok(self.next_line()?.filter(|line| !line.is_empty()))
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            None => Ok(None),
            Some(line) => {
                self.line += 1;
                Ok(Some(line?))
            }
        }
    }

    /// `source,destination,weight[,...]`; trailing fields are ignored
    pub fn parse_edge(&self, row: &str) -> Result<(Node, Node, Weight)> {
        let mut fields = row.split(',');
        let u = parse_next_value!(self, fields, "source vertex");
        let v = parse_next_value!(self, fields, "destination vertex");
        let w: Weight = parse_next_value!(self, fields, "weight");
        raise_error_unless!(self, w.is_finite() && w >= 0.0, format!("invalid weight {w}"));
        Ok((u, v, w))
    }

    /// `id,latitude,longitude[,...]`; trailing fields are ignored
    pub fn parse_node(&self, row: &str) -> Result<(Node, f64, f64)> {
        let mut fields = row.split(',');
        let id = parse_next_value!(self, fields, "vertex id");
        let latitude = parse_next_value!(self, fields, "latitude");
        let longitude = parse_next_value!(self, fields, "longitude");
        Ok((id, latitude, longitude))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn reader(content: &str) -> RowReader<&[u8]> {
        RowReader::new(content.as_bytes(), "test.csv")
    }

    #[test]
    fn rows_until_blank_line() {
        let mut rows = reader("a,b,c\n0,1,2.5\n1,2,3\n\n2,3,4\n");
        rows.skip_header().unwrap();
        assert_eq!(rows.next_row().unwrap().as_deref(), Some("0,1,2.5"));
        assert_eq!(rows.parse_edge("0,1,2.5").unwrap(), (0, 1, 2.5));
        assert_eq!(rows.next_row().unwrap().as_deref(), Some("1,2,3"));
        assert_eq!(rows.line(), 3);
        assert_eq!(rows.next_row().unwrap(), None);
    }

    #[test]
    fn whitespace_line_is_a_row() {
        let mut rows = reader("a,b,c\n0,1,2\n  \n1,2,3\n");
        rows.skip_header().unwrap();
        assert_eq!(rows.next_row().unwrap().as_deref(), Some("0,1,2"));

        let row = rows.next_row().unwrap().unwrap();
        assert_eq!(row, "  ");
        assert!(matches!(
            rows.parse_edge(&row),
            Err(Error::MalformedInput { line: 3, .. })
        ));
        assert_eq!(rows.next_row().unwrap().as_deref(), Some("1,2,3"));
    }

    #[test]
    fn missing_header() {
        let mut rows = reader("");
        assert!(matches!(rows.skip_header(), Err(Error::MalformedInput { line: 0, .. })));
    }

    #[test]
    fn parse_rows() {
        let rows = reader("");
        assert_eq!(rows.parse_edge("3, 4 ,12.5,Porto,Lisboa").unwrap(), (3, 4, 12.5));
        assert_eq!(rows.parse_node("7,41.1,-8.6").unwrap(), (7, 41.1, -8.6));

        for bad in ["3,4", "3;4;1", "a,1,1", "-1,2,3", "1,2,x", "1,2,-5", ""] {
            assert!(
                matches!(rows.parse_edge(bad), Err(Error::MalformedInput { .. })),
                "{bad}"
            );
        }
        assert!(rows.parse_node("7,41.1").is_err());
    }
}
