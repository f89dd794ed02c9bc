//! holidaylet-fix - Reconcile a booking spreadsheet against property settings.

fn main() -> std::process::ExitCode {
    holidaylet::cmd::fix_cmd::main()
}
