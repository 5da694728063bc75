//! Test module for the OTP flow service
