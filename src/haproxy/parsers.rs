use std::io::BufRead;

use super::errors::ClientError;
use super::responses::StatRow;

/// Column indices of the fields read from `show stat` CSV.
struct StatColumns {
    proxy: usize,
    service: usize,
    status: usize,
}

impl StatColumns {
    fn from_header(header: &str) -> Result<Self, ClientError> {
        let names: Vec<&str> = header.split(',').map(str::trim).collect();
        let find = |column: &str| {
            names.iter().position(|n| *n == column).ok_or_else(|| {
                ClientError::ParseFailure(format!("missing column '{}' in stat header", column))
            })
        };

        Ok(Self {
            proxy: find("pxname")?,
            service: find("svname")?,
            status: find("status")?,
        })
    }

    fn width(&self) -> usize {
        self.proxy.max(self.service).max(self.status) + 1
    }
}

/// Parse the CSV reply of `show stat`.
///
/// The reply starts with a `# `-prefixed header naming the columns and ends
/// at EOF or at the first blank line.
pub fn parse_stat<R: BufRead>(reader: &mut R) -> Result<Vec<StatRow>, ClientError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(ClientError::ParseFailure("empty response".into()));
    }

    let header = line.trim_end();
    let columns = if let Some(header) = header.strip_prefix('#') {
        StatColumns::from_header(header)?
    } else if header.starts_with("Unknown command") {
        return Err(ClientError::UnknownCommand(header.to_string()));
    } else {
        return Err(ClientError::ParseFailure(format!(
            "unexpected stat header: {}",
            header
        )));
    };

    let mut rows = Vec::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let row = line.trim_end();
        if row.is_empty() {
            break;
        }

        let fields: Vec<&str> = row.split(',').collect();
        if fields.len() < columns.width() {
            return Err(ClientError::ParseFailure(format!(
                "stat row has {} fields, expected at least {}",
                fields.len(),
                columns.width()
            )));
        }

        rows.push(StatRow {
            proxy: fields[columns.proxy].to_string(),
            service: fields[columns.service].to_string(),
            status: fields[columns.status].to_string(),
        });
    }

    Ok(rows)
}
