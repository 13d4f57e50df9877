//! Interactive studio shell.
//!
//! A rustyline REPL over one `Studio`. Descriptions are generated in a
//! background task so the shell stays usable while a batch runs; the results
//! are printed when they arrive.

pub mod command;
pub mod helper;
pub mod render;

use std::sync::Arc;

use anyhow::{Result, bail};
use colored::Colorize;
use inkspire_application::{GenerationUseCase, Studio};
use inkspire_core::InkspireError;
use inkspire_core::TattooStyle;
use inkspire_core::result::GeneratedResult;
use inkspire_core::session::Credentials;
use inkspire_infrastructure::{ExportService, load_image};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use crate::commands;
use crate::context::AppContext;
use command::{ShellCommand, TryOnAction};
use helper::{PasswordHelper, StudioHelper};
use render::{ResultView, try_on_summary};

type StudioEditor = Editor<StudioHelper, DefaultHistory>;

const HELP: &str = "Commands:
  /login <email>                 sign in
  /signup <email> <name>         create an account
  /logout                        sign out (results stay until you quit)
  /style [id]                    show or change the style
  /styles                        list styles
  /ref <path> | /ref clear       attach or drop a reference image
  /history                       list results, newest first
  /view <n> <color|stencil|split>
  /save <n> [color|stencil]      save both images of result n, or just one
  /print <n>                     write the stencil print page for result n
  /tryon <n> ...                 virtual try-on (photo, move, drag, scale, opacity, blend, export)
  /quit
  anything else                  generate two designs for that description";

struct Shell {
    studio: Arc<Studio>,
    export: ExportService,
}

/// Runs the studio until `/quit` or end of input.
pub async fn run(ctx: &AppContext) -> Result<()> {
    let usecase = GenerationUseCase::new(ctx.generation_client().await?);
    let shell = Shell {
        studio: Arc::new(Studio::new(usecase, ctx.session_gate())),
        export: ctx.export_service(None),
    };

    let mut rl: StudioEditor = Editor::new()?;
    rl.set_helper(Some(StudioHelper::new()));

    println!("{}", "=== InkSpire Studio ===".bright_magenta().bold());
    println!(
        "{}",
        "Sign in with /login or /signup, then describe a tattoo. /help lists commands."
            .bright_black()
    );
    println!();

    loop {
        let prompt = shell.prompt().await;
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                let command = match ShellCommand::parse(trimmed) {
                    Ok(command) => command,
                    Err(e) => {
                        eprintln!("{}", e.to_string().red());
                        continue;
                    }
                };
                if command == ShellCommand::Quit {
                    println!("{}", "Até logo!".bright_green());
                    break;
                }
                if let Err(e) = shell.execute(command).await {
                    eprintln!("{}", format!("{e:#}").red());
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}

impl Shell {
    async fn prompt(&self) -> String {
        let name = match self.studio.session().await {
            Some(session) => session.display_name,
            None => "visitante".to_string(),
        };
        let busy = if self.studio.is_busy() { " …" } else { "" };
        format!("{name}{busy} >> ")
    }

    async fn execute(&self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Login { email } => {
                let password = read_password()?;
                self.sign_in(Credentials::login(email, password)).await
            }
            ShellCommand::SignUp { email, name } => {
                let password = read_password()?;
                self.sign_in(Credentials::sign_up(name, email, password)).await
            }
            ShellCommand::Logout => {
                self.studio.logout().await;
                println!("{}", "Sessão encerrada.".bright_black());
                Ok(())
            }
            ShellCommand::Style(None) => {
                println!("Estilo: {}", self.studio.style().await.label().bright_magenta());
                Ok(())
            }
            ShellCommand::Style(Some(style)) => {
                self.studio.set_style(style).await;
                println!("Estilo: {}", style.label().bright_magenta());
                Ok(())
            }
            ShellCommand::Styles => {
                commands::styles::run();
                Ok(())
            }
            ShellCommand::Reference(path) => {
                let image = load_image(&path).await?;
                println!(
                    "Referência: {} ({}, {} bytes)",
                    path.display(),
                    image.mime_type,
                    image.len()
                );
                self.studio.set_reference(Some(image)).await;
                Ok(())
            }
            ShellCommand::ClearReference => {
                self.studio.set_reference(None).await;
                println!("{}", "Referência removida.".bright_black());
                Ok(())
            }
            ShellCommand::ShowReference => {
                match self.studio.reference().await {
                    Some(image) => println!("Referência: {}, {} bytes", image.mime_type, image.len()),
                    None => println!("{}", "Nenhuma referência.".bright_black()),
                }
                Ok(())
            }
            ShellCommand::History => self.show_history().await,
            ShellCommand::View { position, mode } => {
                let result = self.studio.result_at(position).await?;
                self.studio.set_view_mode(&result.id, mode).await?;
                self.print_result(position, &result).await;
                Ok(())
            }
            ShellCommand::Save { position, images } => {
                let result = self.studio.result_at(position).await?;
                for kind in images.visible_images() {
                    let path = self.export.save_image(&result, *kind).await?;
                    println!("{} {}", "saved".green(), path.display());
                }
                Ok(())
            }
            ShellCommand::Print { position } => {
                let result = self.studio.result_at(position).await?;
                let path = self.export.save_print_document(&result).await?;
                println!("{} {}", "print".green(), path.display());
                Ok(())
            }
            ShellCommand::TryOn { position, action } => self.try_on(position, action).await,
            ShellCommand::Help => {
                println!("{HELP}");
                Ok(())
            }
            ShellCommand::Generate(description) => self.start_generation(description).await,
            ShellCommand::Quit => Ok(()),
        }
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<()> {
        println!("{}", "Entrando...".bright_black());
        let session = self.studio.login(credentials).await?;
        println!(
            "{}",
            format!("Bem-vindo, {}!", session.display_name).bright_green()
        );
        Ok(())
    }

    async fn start_generation(&self, description: String) -> Result<()> {
        if !self.studio.is_signed_in().await {
            bail!("Entre com /login ou /signup antes de gerar.");
        }
        if self.studio.is_busy() {
            println!("{}", "Ainda gerando o lote anterior...".yellow());
            return Ok(());
        }

        let style: TattooStyle = self.studio.style().await;
        println!(
            "{}",
            format!("Gerando designs ({})...", style.label()).bright_black()
        );

        let studio = Arc::clone(&self.studio);
        tokio::spawn(async move {
            match studio.generate(&description).await {
                Ok(batch) => {
                    println!();
                    for (index, result) in batch.iter().enumerate() {
                        println!("{}", result_view(index + 1, result));
                    }
                }
                Err(InkspireError::Busy) => {
                    println!("{}", "Ainda gerando o lote anterior...".yellow());
                }
                Err(e) => {
                    let banner = studio.banner().await.unwrap_or_else(|| e.user_message());
                    eprintln!("{}", banner.red());
                }
            }
        });
        Ok(())
    }

    async fn show_history(&self) -> Result<()> {
        let history = self.studio.history().await;
        if history.is_empty() {
            println!("{}", "Nenhum design ainda.".bright_black());
            return Ok(());
        }
        for (index, result) in history.iter().enumerate() {
            let position = index + 1;
            let heading = history.heading_at(position).unwrap_or_default();
            println!(
                "{} {} {}",
                format!("[{position}]").bright_black(),
                heading.bold(),
                format!("· {} · {}", result.style.label(), result.original_prompt).bright_black()
            );
        }
        Ok(())
    }

    async fn print_result(&self, position: usize, result: &GeneratedResult) {
        let history = self.studio.history().await;
        let view = ResultView {
            position,
            heading: history.heading_at(position).unwrap_or_default(),
            result,
            mode: self.studio.view_mode(&result.id).await,
        };
        println!("{view}");
    }

    async fn try_on(&self, position: usize, action: TryOnAction) -> Result<()> {
        let result = self.studio.result_at(position).await?;
        let id = result.id;

        match action {
            TryOnAction::Photo(path) => {
                let photo = load_image(&path).await?;
                self.studio
                    .update_try_on(&id, |t| t.load_background(photo))
                    .await?;
            }
            TryOnAction::Clear => {
                self.studio.update_try_on(&id, |t| t.clear_background()).await?;
            }
            TryOnAction::Move { x, y } => {
                self.studio.update_try_on(&id, |t| t.set_position(x, y)).await?;
            }
            TryOnAction::Nudge { dx, dy } => {
                self.studio.update_try_on(&id, |t| t.nudge(dx, dy)).await?;
            }
            TryOnAction::Drag { x, y, rect } => {
                let moved = self
                    .studio
                    .update_try_on(&id, |t| {
                        t.begin_drag();
                        let moved = t.drag_to(x, y, rect);
                        t.end_drag();
                        moved
                    })
                    .await?;
                if !moved {
                    println!("{}", "Carregue uma foto antes de arrastar.".yellow());
                }
            }
            TryOnAction::Scale(scale) => {
                self.studio.update_try_on(&id, |t| t.set_scale(scale)).await?;
            }
            TryOnAction::Opacity(opacity) => {
                self.studio.update_try_on(&id, |t| t.set_opacity(opacity)).await?;
            }
            TryOnAction::Blend(mode) => {
                self.studio.update_try_on(&id, |t| t.set_blend_mode(mode)).await?;
            }
            TryOnAction::Show => {}
            TryOnAction::Export => {
                let state = self.studio.try_on(&id).await;
                let path = self.export.save_try_on_preview(&result, &state).await?;
                println!("{} {}", "preview".green(), path.display());
                return Ok(());
            }
        }

        println!("{}", try_on_summary(&self.studio.try_on(&id).await));
        Ok(())
    }
}

/// Reads a password on its own editor: masked, never in the shell history.
/// The mock gate discards it after the form check.
fn read_password() -> Result<String> {
    let mut rl: Editor<PasswordHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(PasswordHelper));
    Ok(rl.readline("password: ")?)
}

fn result_view(position: usize, result: &GeneratedResult) -> ResultView<'_> {
    ResultView {
        position,
        heading: result
            .view_label
            .clone()
            .unwrap_or_else(|| format!("Opção #{position}")),
        result,
        mode: Default::default(),
    }
}
