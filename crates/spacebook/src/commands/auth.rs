//! Auth command handlers: login, signup, logout, whoami, role
//! switching, owner upgrade, email verification.

use owo_colors::OwoColorize;

use spacebook_core::model::User;
use spacebook_core::{Portal, Signup};

use crate::cli::{AuthArgs, AuthCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(portal: &Portal, args: AuthArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        AuthCommand::Login { email, password } => {
            let email = util::prompt_or(email, "Email")?;
            let password = util::password_or(password, "Password")?;
            let user = portal.login(&email, &password).await?;
            if !global.quiet {
                eprintln!("Signed in as {} ({})", user.email, user.active_role);
            }
            Ok(())
        }

        AuthCommand::Signup {
            name,
            email,
            phone,
            owner,
        } => {
            let password = util::password_or(None, "Password")?;
            let signup = Signup {
                name,
                email,
                password,
                phone,
            };
            let user = if owner {
                portal.register_owner(signup).await?
            } else {
                portal.register_client(signup).await?
            };
            if !global.quiet {
                eprintln!("Account created; signed in as {}", user.email);
                if !user.email_verified {
                    eprintln!("Check your inbox and run: spacebook auth verify-email <token>");
                }
            }
            Ok(())
        }

        AuthCommand::Logout => {
            portal.logout().await;
            if !global.quiet {
                eprintln!("Signed out");
            }
            Ok(())
        }

        AuthCommand::Whoami => {
            let user = portal.current_user().ok_or(CliError::NotSignedIn)?;
            let out = output::render_single(
                &global.output,
                user.as_ref(),
                |u| whoami_detail(u, output::should_color(&global.color)),
                |u| u.id.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AuthCommand::SwitchRole { role } => {
            let user = portal.switch_role(role.into()).await?;
            if !global.quiet {
                eprintln!("Now acting as {}", user.active_role);
            }
            Ok(())
        }

        AuthCommand::Upgrade => {
            portal.request_owner_upgrade().await?;
            if !global.quiet {
                eprintln!("Owner upgrade requested; you will be notified by email");
            }
            Ok(())
        }

        AuthCommand::VerifyEmail { token } => {
            portal.verify_email(&token).await?;
            if !global.quiet {
                eprintln!("Email verified");
            }
            Ok(())
        }
    }
}

fn whoami_detail(user: &User, color: bool) -> String {
    let roles = user
        .roles
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    let name = if color {
        user.name.bold().to_string()
    } else {
        user.name.clone()
    };
    format!(
        "{name} <{email}>\n  roles:  {roles}\n  active: {active}\n  verified: {verified}",
        email = user.email,
        active = user.active_role,
        verified = if user.email_verified { "yes" } else { "no" },
    )
}
