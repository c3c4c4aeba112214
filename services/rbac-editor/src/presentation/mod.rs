//! 展示层

pub mod matrix_view;

pub use matrix_view::{ColumnHeader, EditorView, MatrixCell, MatrixRow, MatrixView};
