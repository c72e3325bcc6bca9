mod load_test;
mod process_env_test;
