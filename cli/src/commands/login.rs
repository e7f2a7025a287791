use attendr_common::config::Config;
use attendr_common::success;

use crate::commands::{self, AccountArgs};
use crate::mprint;
use crate::terminal::{print, spinner};

/// Log in once and print the handle so later runs can skip the password.
pub async fn login(args: AccountArgs, cfg: &Config) -> anyhow::Result<()> {
    let credentials = args.credentials()?;
    let service = commands::build_service(cfg)?;

    let sp = spinner::start("Logging in to the ERP...");
    let outcome = service.login(&credentials).await;
    sp.finish_and_clear();

    let session = outcome.map_err(commands::friendly)?;

    success!("Login successful. Hello, {}!", session.identity.display_name);
    mprint!();

    print::GLOBAL_KEY_WIDTH.set(12);
    print::aligned_line("SID", session.handle.sid.clone());
    print::aligned_line("Session id", session.handle.session_id.clone());
    print::aligned_line("UID", session.handle.uid.to_string());

    mprint!();
    print::print_status(
        "Reuse with: attendr summary --sid <SID> --session-id <SESSION> --uid <UID>",
    );
    Ok(())
}
