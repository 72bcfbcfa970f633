//! Temporal Flow Core Types
//!
//! This crate provides the foundational types shared by the Temporal Flow
//! crates:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Categories**: The caller / workflow / activity partition ([`category::Category`])
//! - **Entities**: Input records and the snapshot holding them ([`entity`] module)
//! - **Model**: Nodes, edges and the assembled diagram ([`model`] module)

pub mod category;
pub mod entity;
pub mod identifier;
pub mod model;
