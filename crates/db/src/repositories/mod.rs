pub mod lead_repo;
