use crate::domain::model::{NodeId, NodeRecord};
use crate::utils::error::Result;
use csv::{ByteRecord, ReaderBuilder};
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

/// In-memory copy of the ASL node list (`astdb.txt`).
///
/// The file is `|`-delimited with `'` as the quote character, `;` comment
/// lines and Latin-1 text: `node|callsign|description|location`. The first
/// line seen for a node wins.
#[derive(Debug, Clone, Default)]
pub struct NodeDatabase {
    records: HashMap<NodeId, NodeRecord>,
}

impl NodeDatabase {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Best-effort load: an unreadable file yields an empty database so
    /// every node reads as unknown.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(db) => {
                tracing::debug!("Loaded {} nodes from {}", db.len(), path.display());
                db
            }
            Err(e) => {
                tracing::warn!(
                    "Node database {} unreadable, all nodes treated as unknown: {}",
                    path.display(),
                    e
                );
                Self::empty()
            }
        }
    }

    pub fn try_load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Ok(Self::from_reader(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Self {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .delimiter(b'|')
            .quote(b'\'')
            .comment(Some(b';'))
            .flexible(true)
            .from_reader(reader);

        let mut records = HashMap::new();
        let mut skipped = 0usize;
        let mut row = ByteRecord::new();

        loop {
            match rdr.read_byte_record(&mut row) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) if e.is_io_error() => {
                    tracing::warn!("Node database read aborted: {}", e);
                    break;
                }
                Err(e) => {
                    tracing::warn!("Skipping unreadable node database line: {}", e);
                    skipped += 1;
                    continue;
                }
            }

            // 同一節點只保留第一筆
            match parse_row(&row) {
                Some(record) => {
                    records.entry(record.node).or_insert(record);
                }
                None => {
                    let line = row.position().map(|p| p.line()).unwrap_or_default();
                    tracing::warn!("Skipping malformed node database line {}", line);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            tracing::debug!("Skipped {} malformed node database lines", skipped);
        }

        Self { records }
    }

    pub fn lookup(&self, node: NodeId) -> Option<&NodeRecord> {
        self.records.get(&node)
    }

    pub fn describe(&self, node: NodeId) -> String {
        self.lookup(node)
            .map(NodeRecord::describe)
            .unwrap_or_else(|| "(unknown)".to_string())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_row(row: &ByteRecord) -> Option<NodeRecord> {
    if row.len() < 2 {
        return None;
    }

    let node = latin1(row.get(0)?).trim().parse::<NodeId>().ok()?;
    let field = |i: usize| row.get(i).map(latin1).unwrap_or_default();

    Some(NodeRecord {
        node,
        callsign: field(1),
        description: field(2),
        location: field(3),
    })
}

/// Every Latin-1 byte maps to the code point of the same value.
fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
