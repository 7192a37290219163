//! Scenario tests for the collision kernel and movement gate
