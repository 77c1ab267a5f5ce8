pub mod refresh_token_repository;
