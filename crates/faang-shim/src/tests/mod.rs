//! Test suite for the activation lifecycle.

mod support;
