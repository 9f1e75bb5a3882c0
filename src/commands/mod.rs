//! Command registry with hierarchical organization
//!
//! This module holds the read-only definition of every command and group the web
//! interface can browse. Groups list their children by name, in declared order, and
//! refer to them through [`registry::NodeId`] handles into a [`registry::Registry`]
//! arena. A single definition may be listed under several parents (a mounted
//! command), and the name it is listed under is what ends up in its path.
//!
//! Parameter declarations are carried along untouched; turning them into form
//! controls or validating submitted values is left to the consumers of the tree.

pub mod command;
pub mod group;
pub mod param;
pub mod registry;
pub mod short_help;
