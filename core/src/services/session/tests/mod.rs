//! Tests for the session handoff service
