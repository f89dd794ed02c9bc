//! holidaylet-ref - Decode or encode a booking reference.

fn main() -> std::process::ExitCode {
    holidaylet::cmd::ref_cmd::main()
}
