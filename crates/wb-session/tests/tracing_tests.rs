use wb_session::{Environment, tracing::init_tracing};

#[test]
fn test_second_init_is_an_error() {
    // Integration test files run in their own process.
    init_tracing(&Environment::Development).expect("first initialisation");
    assert!(init_tracing(&Environment::Production).is_err());
}
