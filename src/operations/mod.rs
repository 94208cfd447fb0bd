pub mod setup_session;
