//! Arrow schemas and batches for the global node and edge tables

use std::sync::{Arc, LazyLock};

use arrow::array::{ArrayRef, Int32Array, RecordBatch, StringArray, UInt64Array, UInt8Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;

use crate::aggregate::{Edge, Node};

pub static NODES: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::UInt64, false),
        Field::new("name", DataType::Utf8, false),
        Field::new("power", DataType::UInt64, false),
        Field::new("first", DataType::Int32, false),
        Field::new("last", DataType::Int32, false),
        Field::new("group", DataType::UInt8, false),
    ]))
});

pub static EDGES: LazyLock<Arc<Schema>> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::UInt64, true),
        Field::new("source", DataType::UInt64, false),
        Field::new("target", DataType::UInt64, false),
        Field::new("weight", DataType::UInt64, false),
    ]))
});

pub fn nodes() -> &'static Schema {
    &NODES
}

pub fn edges() -> &'static Schema {
    &EDGES
}

pub fn nodes_batch(nodes: &[Node]) -> Result<RecordBatch, ArrowError> {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from_iter_values(nodes.iter().map(|n| n.id as u64))),
        Arc::new(StringArray::from_iter_values(nodes.iter().map(|n| n.name.as_ref()))),
        Arc::new(UInt64Array::from_iter_values(nodes.iter().map(|n| n.power as u64))),
        Arc::new(Int32Array::from_iter_values(nodes.iter().map(|n| n.first))),
        Arc::new(Int32Array::from_iter_values(nodes.iter().map(|n| n.last))),
        Arc::new(UInt8Array::from_iter_values(nodes.iter().map(|n| n.group))),
    ];
    RecordBatch::try_new(NODES.clone(), columns)
}

pub fn edges_batch(edges: &[Edge]) -> Result<RecordBatch, ArrowError> {
    let columns: Vec<ArrayRef> = vec![
        Arc::new(UInt64Array::from(
            edges.iter().map(|e| e.id.map(|id| id as u64)).collect::<Vec<_>>(),
        )),
        Arc::new(UInt64Array::from_iter_values(edges.iter().map(|e| e.source as u64))),
        Arc::new(UInt64Array::from_iter_values(edges.iter().map(|e| e.target as u64))),
        Arc::new(UInt64Array::from_iter_values(edges.iter().map(|e| e.weight as u64))),
    ];
    RecordBatch::try_new(EDGES.clone(), columns)
}
