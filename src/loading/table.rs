use crate::Coordinate;
use anyhow::Context;
use std::path::Path;
use std::str::FromStr;

/// One keyed row of a feature table.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub key: Coordinate,
    pub features: Vec<Coordinate>,
}

/// A comma-delimited table whose first column is a numeric key.
///
/// Every non-blank line is `key,f1,...,fm` with the same m on every line.
/// Keys and features must be finite. Negative zero keys are stored as zero
/// so that `-0` and `0` join.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    width: usize,
    rows: Vec<Row>,
}

impl Table {
    pub fn read(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        log::debug!("{:<32}{:<32}", "reading table", path.display());
        std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?
            .parse::<Self>()
            .with_context(|| format!("parse {}", path.display()))
    }
    /// number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    /// number of feature columns, excluding the key
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
    /// Rows in ascending key order. Fails on a repeated key.
    pub fn sorted(&self) -> anyhow::Result<Vec<&Row>> {
        let mut rows = self.rows.iter().collect::<Vec<&Row>>();
        rows.sort_by(|a, b| a.key.total_cmp(&b.key));
        match rows.windows(2).find(|pair| pair[0].key == pair[1].key) {
            Some(pair) => Err(anyhow::anyhow!("duplicate key {}", pair[0].key)),
            None => Ok(rows),
        }
    }
}

impl FromStr for Table {
    type Err = anyhow::Error;
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut table = Self::default();
        for (n, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .parse::<Row>()
                .with_context(|| format!("line {}", n + 1))?;
            if table.rows.is_empty() {
                table.width = row.features.len();
            } else if row.features.len() != table.width {
                return Err(anyhow::anyhow!(
                    "line {}: expected {} features, found {}",
                    n + 1,
                    table.width,
                    row.features.len()
                ));
            }
            table.rows.push(row);
        }
        Ok(table)
    }
}

impl FromStr for Row {
    type Err = anyhow::Error;
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut values = line.split(',').map(str::trim).map(|field| {
            field
                .parse::<Coordinate>()
                .ok()
                .filter(|x| x.is_finite())
                .ok_or_else(|| anyhow::anyhow!("invalid number {:?}", field))
        });
        let key = values
            .next()
            .ok_or_else(|| anyhow::anyhow!("missing key"))??;
        let features = values.collect::<anyhow::Result<Vec<Coordinate>>>()?;
        Ok(Self {
            key: key + 0.,
            features,
        })
    }
}
