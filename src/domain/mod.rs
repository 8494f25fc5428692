// Domain layer - Core types and policies

pub mod model;
pub mod rules;
