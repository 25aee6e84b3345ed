//! Общие типы гида: таксономия, бизнесы, DTO и чистый фильтр таксономии.

pub mod domain;
pub mod enums;
pub mod shared;
