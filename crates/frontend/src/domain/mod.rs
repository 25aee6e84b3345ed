pub mod guide_home;
pub mod taxonomy_admin;
