//! Tests for the Rocket.Chat client over the mock transport.


#[cfg(test)]
mod services_tests;
