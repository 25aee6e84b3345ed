pub mod business_status;
