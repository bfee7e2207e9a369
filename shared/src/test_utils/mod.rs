pub mod mock_schema_store;
pub mod mock_secret_store;
pub mod mock_user_store;
pub mod test_data;
pub mod test_logging;
