mod test_client_roster_dropped;
mod test_echo_round_trip;
mod test_signal_reaches_recipient_only;
mod test_spoofed_sender_dropped;
