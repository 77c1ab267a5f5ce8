pub mod product_cache_repository;
