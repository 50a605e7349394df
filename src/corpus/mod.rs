//! Test corpus loading
//!
//! Splits the query and DAG corpora into per-case units and pairs them by
//! position. Queries are delimited by their leading `t` header marker, DAGs
//! by newlines.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::models::WorkItem;

/// Marker that opens every query in the query corpus
const QUERY_MARKER: char = 't';

/// Errors raised while building the case list
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read {kind} corpus {}", path.display())]
    Unreadable {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{kind} corpus contains no cases")]
    Empty { kind: &'static str },

    #[error("corpus length mismatch: {queries} queries but {graphs} DAGs")]
    LengthMismatch { queries: usize, graphs: usize },
}

/// Split a query corpus into units, each starting with the `t` marker
pub fn split_queries(blob: &str) -> Vec<String> {
    blob.split(QUERY_MARKER)
        .filter(|unit| !unit.is_empty())
        .map(|unit| format!("{QUERY_MARKER}{unit}"))
        .collect()
}

/// Split a DAG corpus into newline-terminated units
pub fn split_graphs(blob: &str) -> Vec<String> {
    blob.split('\n')
        .filter(|unit| !unit.is_empty())
        .map(|unit| format!("{unit}\n"))
        .collect()
}

/// Pair the n-th query with the n-th DAG
pub fn pair_cases(queries: Vec<String>, graphs: Vec<String>) -> Result<Vec<WorkItem>, CorpusError> {
    if queries.is_empty() {
        return Err(CorpusError::Empty { kind: "query" });
    }
    if graphs.is_empty() {
        return Err(CorpusError::Empty { kind: "DAG" });
    }
    if queries.len() != graphs.len() {
        return Err(CorpusError::LengthMismatch {
            queries: queries.len(),
            graphs: graphs.len(),
        });
    }

    Ok(queries
        .into_iter()
        .zip(graphs)
        .map(|(query, graph)| WorkItem::new(query, graph))
        .collect())
}

/// Build the case list from two in-memory corpora
pub fn parse_cases(query_blob: &str, graph_blob: &str) -> Result<Vec<WorkItem>, CorpusError> {
    pair_cases(split_queries(query_blob), split_graphs(graph_blob))
}

/// Read both corpus files and build the case list
pub fn load_cases(
    query_path: impl AsRef<Path>,
    graph_path: impl AsRef<Path>,
) -> Result<Vec<WorkItem>, CorpusError> {
    let query_blob = read_corpus("query", query_path.as_ref())?;
    let graph_blob = read_corpus("DAG", graph_path.as_ref())?;

    let cases = parse_cases(&query_blob, &graph_blob)?;
    debug!("Loaded {} cases", cases.len());
    Ok(cases)
}

fn read_corpus(kind: &'static str, path: &Path) -> Result<String, CorpusError> {
    std::fs::read_to_string(path).map_err(|source| CorpusError::Unreadable {
        kind,
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const QUERIES: &str = "t 0 3 4\nv 0 1 2\nv 1 2 1\nv 2 3 1\n\
                           t 1 2 1\nv 0 5 1\nv 1 6 1\n";
    const DAGS: &str = "3 0 1 2\n2 1 0\n";

    #[test]
    fn test_split_queries_keeps_marker() {
        let queries = split_queries(QUERIES);
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0], "t 0 3 4\nv 0 1 2\nv 1 2 1\nv 2 3 1\n");
        assert_eq!(queries[1], "t 1 2 1\nv 0 5 1\nv 1 6 1\n");
    }

    #[test]
    fn test_split_graphs_restores_newline() {
        let graphs = split_graphs("1 2\n\n3 4\n5 6");
        assert_eq!(graphs, vec!["1 2\n", "3 4\n", "5 6\n"]);
    }

    #[test]
    fn test_parse_cases_pairs_by_position() {
        let cases = parse_cases(QUERIES, DAGS).unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].label(), "t 0 3 4");
        assert_eq!(cases[0].graph, "3 0 1 2\n");
        assert_eq!(cases[1].label(), "t 1 2 1");
        assert_eq!(cases[1].graph, "2 1 0\n");
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let queries = "t 0\nt 1\nt 2\nt 3\nt 4\n";
        let graphs = "a\nb\nc\nd\n";
        match parse_cases(queries, graphs) {
            Err(CorpusError::LengthMismatch { queries, graphs }) => {
                assert_eq!(queries, 5);
                assert_eq!(graphs, 4);
            }
            other => panic!("Expected LengthMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_corpus_is_rejected() {
        assert!(matches!(
            parse_cases("", DAGS),
            Err(CorpusError::Empty { kind: "query" })
        ));
        assert!(matches!(
            parse_cases(QUERIES, "\n\n"),
            Err(CorpusError::Empty { kind: "DAG" })
        ));
    }

    #[test]
    fn test_load_cases_from_files() {
        let dir = tempdir().unwrap();
        let query_path = dir.path().join("queries.igraph");
        let dag_path = dir.path().join("dags.txt");
        std::fs::write(&query_path, QUERIES).unwrap();
        std::fs::write(&dag_path, DAGS).unwrap();

        let cases = load_cases(&query_path, &dag_path).unwrap();
        assert_eq!(cases.len(), 2);
    }

    #[test]
    fn test_load_cases_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_cases(dir.path().join("nope"), dir.path().join("nope2")).unwrap_err();
        assert!(matches!(err, CorpusError::Unreadable { kind: "query", .. }));
    }
}
