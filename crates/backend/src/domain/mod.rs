pub mod a001_category;
pub mod a002_subcategory;
pub mod a003_location;
pub mod a004_business;
pub mod guide_home;
