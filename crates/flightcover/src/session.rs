//! Line-driven front end over [`App`].
//!
//! Each input line is one user event (a click, a keystroke batch, a submit).
//! [`Session::handle_line`] applies it and returns the text to show.

use std::io::{BufRead, Write};

use serde::Serialize;

use crate::app::App;
use crate::error::Result;
use crate::flights::{InsuredFlights, Transaction};
use crate::intake::{IntakeField, SubmitOutcome};
use crate::modal::PointerTarget;

const HELP: &[&str] = &[
    "connect                 connect the demo wallet",
    "disconnect              disconnect and return home",
    "home | dashboard        switch page",
    "start                   landing page call to action",
    "insure                  open the Insure Flight form (dashboard)",
    "set <field> <value>     edit a form field",
    "tag <text>              type wallet addresses, then press enter",
    "untag <index>           remove a wallet address tag",
    "form                    show the form",
    "state                   show page, wallet and form state",
    "submit                  submit the form",
    "close | backdrop        close the form / click outside it",
    "inside                  click inside the form",
    "ack                     dismiss the current notice",
    "flights | view <id>     list insured flights / show details",
    "transactions            show transactions matching the filter",
    "filter <status>         add a status filter tag",
    "unfilter <index>        remove a status filter tag",
    "quit                    leave",
];

/// Output of one handled line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    /// Lines to print.
    pub lines: Vec<String>,
    /// The user asked to leave.
    pub quit: bool,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Self {
            lines: vec![text.into()],
            quit: false,
        }
    }

    fn lines(lines: Vec<String>) -> Self {
        Self { lines, quit: false }
    }
}

/// An interactive session.
#[derive(Debug, Clone)]
pub struct Session {
    app: App,
}

impl Session {
    /// Wrap an initialized [`App`].
    #[must_use]
    pub fn new(app: App) -> Self {
        Self { app }
    }

    /// The application state.
    #[must_use]
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Prompt reflecting the current page and modal.
    #[must_use]
    pub fn prompt(&self) -> String {
        if self.app.modal().is_open() {
            format!("{} [insure flight]> ", self.app.route())
        } else {
            format!("{}> ", self.app.route())
        }
    }

    /// Drive the session from `input` until `quit` or end of input, writing
    /// prompts and replies to `output`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if reading or writing fails.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        let mut line = String::new();
        loop {
            write!(output, "{}", self.prompt())?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                return Ok(());
            }

            let reply = self.handle_line(&line);
            for text in &reply.lines {
                writeln!(output, "{text}")?;
            }
            if reply.quit {
                return Ok(());
            }
        }
    }

    /// Apply one line of input.
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let line = line.trim();
        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(c, r)| (c, r.trim()));

        let mut reply = match command {
            "" => Reply::default(),
            "help" | "?" => Reply::lines(HELP.iter().map(|s| (*s).to_string()).collect()),
            "quit" | "exit" => Reply {
                lines: vec!["Bye.".to_string()],
                quit: true,
            },
            "connect" => {
                self.app.connect_wallet();
                Reply::line(format!("Wallet connected: {}", self.app.wallet().address()))
            }
            "disconnect" => {
                self.app.disconnect_wallet();
                Reply::line("Wallet disconnected.")
            }
            "home" => {
                self.app.go_home();
                Reply::default()
            }
            "dashboard" => match self.app.open_dashboard() {
                Ok(()) => self.render_dashboard(),
                Err(e) => Reply::line(format!("Error: {e}")),
            },
            "start" => {
                if self.app.get_started() {
                    Reply::line("Insure Flight form opened.")
                } else {
                    Reply::default()
                }
            }
            "insure" => match self.app.insure_flight() {
                Ok(()) => Reply::line("Insure Flight form opened."),
                Err(e) => Reply::line(format!("Error: {e}")),
            },
            "set" => self.set_field(rest),
            "tag" => self.tag(rest),
            "untag" => self.untag(rest),
            "form" => self.render_form(),
            "state" => self.render_state(),
            "submit" => self.submit(),
            "close" => self.dismiss(None),
            "backdrop" => self.dismiss(Some(PointerTarget::Backdrop)),
            "inside" => self.dismiss(Some(PointerTarget::Content)),
            "ack" => match self.app.acknowledge() {
                Some(_) => Reply::default(),
                None => Reply::line("Nothing to acknowledge."),
            },
            "flights" => Reply::lines(render_flights(self.app.flights())),
            "view" => self.view(rest),
            "transactions" => {
                let visible: Vec<&Transaction> = self.app.transactions().visible().collect();
                Reply::lines(render_transactions(&visible))
            }
            "filter" => {
                let added = self.app.transactions_mut().status_filter_mut().add(rest);
                if added.is_some() {
                    self.render_filter()
                } else {
                    Reply::line("Usage: filter <status>")
                }
            }
            "unfilter" => match rest.parse::<usize>() {
                Ok(index) => {
                    self.app.transactions_mut().status_filter_mut().remove_at(index);
                    self.render_filter()
                }
                Err(_) => Reply::line("Usage: unfilter <index>"),
            },
            other => Reply::line(format!("Unknown command '{other}'. Type 'help'.")),
        };

        if let Some(notice) = self.app.notice() {
            reply.lines.push(format!("{notice} (ack to dismiss)"));
        }
        reply
    }

    fn set_field(&mut self, args: &str) -> Reply {
        let Some((name, value)) = args
            .split_once(char::is_whitespace)
            .or(Some((args, "")))
            .filter(|(name, _)| !name.is_empty())
        else {
            return Reply::line("Usage: set <field> <value>");
        };
        let field = match name.parse::<IntakeField>() {
            Ok(field) => field,
            Err(e) => return Reply::line(format!("Error: {e}")),
        };
        let Some(controller) = self.app.modal_mut().controller_mut() else {
            return Reply::line("No form is open.");
        };
        controller.set_field(field, value);
        Reply::default()
    }

    fn tag(&mut self, text: &str) -> Reply {
        let Some(controller) = self.app.modal_mut().controller_mut() else {
            return Reply::line("No form is open.");
        };
        controller.type_wallets(text);
        controller.commit_wallet();
        self.render_tags()
    }

    fn untag(&mut self, arg: &str) -> Reply {
        let Ok(index) = arg.parse::<usize>() else {
            return Reply::line("Usage: untag <index>");
        };
        let Some(controller) = self.app.modal_mut().controller_mut() else {
            return Reply::line("No form is open.");
        };
        controller.remove_wallet(index);
        self.render_tags()
    }

    fn submit(&mut self) -> Reply {
        match self.app.submit() {
            SubmitOutcome::Accepted => Reply::line("Submitted."),
            SubmitOutcome::Rejected(e) => Reply::line(format!("Error: {e}")),
            SubmitOutcome::Ignored => Reply::line("No form is open."),
        }
    }

    fn dismiss(&mut self, target: Option<PointerTarget>) -> Reply {
        if !self.app.modal().is_open() {
            return Reply::line("No form is open.");
        }
        let closed = match target {
            Some(target) => self.app.modal_mut().click(target),
            None => self.app.modal_mut().close(),
        };
        if closed {
            Reply::line("Form closed.")
        } else {
            Reply::default()
        }
    }

    fn view(&self, arg: &str) -> Reply {
        let Ok(id) = arg.parse::<u64>() else {
            return Reply::line("Usage: view <id>");
        };
        match self.app.view_flight(id) {
            Ok(flight) => Reply::lines(flight.record.to_string().lines().map(String::from).collect()),
            Err(e) => Reply::line(format!("Error: {e}")),
        }
    }

    fn render_dashboard(&self) -> Reply {
        let mut lines = vec!["Dashboard".to_string()];
        lines.extend(render_flights(self.app.flights()));
        Reply::lines(lines)
    }

    fn render_form(&self) -> Reply {
        let Some(controller) = self.app.modal().controller() else {
            return Reply::line("No form is open.");
        };
        let form = controller.form();
        let mut lines = vec!["Insure Flight".to_string()];
        if let Some(error) = form.error() {
            lines.push(format!("  ! {error}"));
        }
        for field in IntakeField::ALL {
            if field == IntakeField::PassengerWallets {
                continue;
            }
            lines.push(format!("  {:<24}{}", field.label(), form.value(field)));
        }
        lines.push(format!("  {}", IntakeField::PassengerWallets.label()));
        for (i, tag) in form.wallets().tags().iter().enumerate() {
            lines.push(format!("    [{i}] {}", tag.text));
        }
        Reply::lines(lines)
    }

    fn render_state(&self) -> Reply {
        let wallet = self.app.wallet();
        let mut lines = vec![
            format!("Page:   {}", self.app.route()),
            if wallet.is_connected() {
                format!("Wallet: connected ({})", wallet.address())
            } else {
                "Wallet: disconnected".to_string()
            },
        ];
        match self.app.modal().controller() {
            Some(controller) => lines.push(format!("Form:   open, {}", controller.state())),
            None => lines.push("Form:   closed".to_string()),
        }
        Reply::lines(lines)
    }

    fn render_tags(&self) -> Reply {
        let Some(controller) = self.app.modal().controller() else {
            return Reply::default();
        };
        let lines = controller
            .form()
            .wallets()
            .tags()
            .iter()
            .enumerate()
            .map(|(i, tag)| format!("  [{i}] {}", tag.text))
            .collect();
        Reply::lines(lines)
    }

    fn render_filter(&self) -> Reply {
        let tags: Vec<String> = self
            .app
            .transactions()
            .status_filter()
            .tags()
            .iter()
            .enumerate()
            .map(|(i, tag)| format!("[{i}] {}", tag.text))
            .collect();
        Reply::line(format!("Filter: {}", tags.join(" ")))
    }
}

/// Write `value` as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns [`crate::Error::Json`] if serialization fails and
/// [`crate::Error::Io`] if writing fails.
pub fn write_json<W: Write, T: Serialize + ?Sized>(output: &mut W, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    writeln!(output, "{json}")?;
    Ok(())
}

/// One line per insured flight: `#<id>  Flight <number>`.
#[must_use]
pub fn render_flights(flights: &InsuredFlights) -> Vec<String> {
    if flights.is_empty() {
        return vec!["No insured flights.".to_string()];
    }
    flights
        .all()
        .iter()
        .map(|f| format!("#{:<3} Flight {}", f.id, f.record.flight_number()))
        .collect()
}

/// A table of transactions with a header row.
#[must_use]
pub fn render_transactions(transactions: &[&Transaction]) -> Vec<String> {
    let mut lines = vec![format!(
        "{:<14}{:<8}{:<16}{:<12}{}",
        "Flight Number", "Time", "Wallet Address", "Status", "Insurance Amount"
    )];
    lines.extend(transactions.iter().map(|t| {
        format!(
            "{:<14}{:<8}{:<16}{:<12}{}",
            t.flight_number,
            t.time_of_flight.format("%H:%M").to_string(),
            t.wallet_address,
            t.status.as_str(),
            t.insurance_amount
        )
    }));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use chrono::NaiveDate;

    const ADDR: &str = "0x1234567890123456789012345678901234567890";

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn session() -> Session {
        Session::new(App::init_with_today(&Config::default(), fixed_today))
    }

    fn run(session: &mut Session, lines: &[&str]) -> Vec<String> {
        lines
            .iter()
            .flat_map(|l| session.handle_line(l).lines)
            .collect()
    }

    #[test]
    fn test_start_without_wallet_shows_notice() {
        let mut s = session();
        let out = run(&mut s, &["start"]);
        assert!(out.iter().any(|l| l.contains("Please connect your wallet")));
        assert!(!s.app().modal().is_open());
    }

    #[test]
    fn test_full_insure_flow() {
        let mut s = session();
        run(
            &mut s,
            &[
                "connect",
                "dashboard",
                "insure",
                "set airplane_name Boeing 737 MAX",
                "set code AAL",
                "set flight AA1234",
                "set date 2026-12-01",
                "set price 0.30",
            ],
        );
        let out = run(&mut s, &[&format!("tag {ADDR}")]);
        assert_eq!(out, vec![format!("  [0] {ADDR}")]);

        let out = run(&mut s, &["submit"]);
        assert_eq!(out[0], "Submitted.");
        assert!(out[1].contains("processed successfully"));
        assert_eq!(s.app().flights().len(), 3);

        let out = run(&mut s, &["view 3"]);
        assert!(out.iter().any(|l| l.contains("Boeing 737 MAX")));

        run(&mut s, &["ack"]);
        assert!(s.app().notice().is_none());
    }

    #[test]
    fn test_submit_rejection_is_reported() {
        let mut s = session();
        run(&mut s, &["connect", "start"]);
        let out = run(&mut s, &["submit"]);
        assert_eq!(out, vec!["Error: Please fill in all fields correctly."]);
        assert!(s.prompt().contains("[insure flight]"));
    }

    #[test]
    fn test_tag_with_commas_adds_several() {
        let mut s = session();
        run(&mut s, &["connect", "start"]);
        let out = run(&mut s, &["tag a, b ,c"]);
        assert_eq!(out, vec!["  [0] a", "  [1] b", "  [2] c"]);
        let out = run(&mut s, &["untag 1"]);
        assert_eq!(out, vec!["  [0] a", "  [1] c"]);
    }

    #[test]
    fn test_inside_click_keeps_form_open() {
        let mut s = session();
        run(&mut s, &["connect", "start", "inside"]);
        assert!(s.app().modal().is_open());
        run(&mut s, &["backdrop"]);
        assert!(!s.app().modal().is_open());
    }

    #[test]
    fn test_set_without_form() {
        let mut s = session();
        assert_eq!(run(&mut s, &["set flight AA123"]), vec!["No form is open."]);
    }

    #[test]
    fn test_set_unknown_field() {
        let mut s = session();
        run(&mut s, &["connect", "start"]);
        let out = run(&mut s, &["set seat 12A"]);
        assert_eq!(out, vec!["Error: unknown field 'seat'"]);
    }

    #[test]
    fn test_dashboard_without_wallet() {
        let mut s = session();
        assert_eq!(
            run(&mut s, &["dashboard"]),
            vec!["Error: wallet is not connected"]
        );
    }

    #[test]
    fn test_transactions_filter() {
        let mut s = session();
        let out = run(&mut s, &["transactions"]);
        assert_eq!(out.len(), 3);

        run(&mut s, &["unfilter 0"]);
        let out = run(&mut s, &["transactions"]);
        assert_eq!(out.len(), 2);
        assert!(out[1].starts_with("UA5678"));
    }

    #[test]
    fn test_state_reports_wallet_and_form() {
        let mut s = session();
        let out = run(&mut s, &["state"]);
        assert_eq!(out[0], "Page:   home");
        assert_eq!(out[1], "Wallet: disconnected");
        assert_eq!(out[2], "Form:   closed");

        run(&mut s, &["connect", "start"]);
        let out = run(&mut s, &["state"]);
        assert_eq!(out[1], "Wallet: connected (0xYourWalletAddress)");
        assert!(out[2].starts_with("Form:   open"));
    }

    #[test]
    fn test_set_keeps_value_as_typed() {
        let mut s = session();
        run(
            &mut s,
            &[
                "connect",
                "start",
                "set name A320",
                "set code DAL",
                "set flight  DL456",
                "set date 2026-10-18",
                "set price 0.10",
                &format!("tag {ADDR}"),
            ],
        );
        let form = s.app().modal().controller().unwrap().form();
        assert_eq!(form.value(IntakeField::FlightNumber), " DL456");

        let out = run(&mut s, &["submit"]);
        assert!(out[0].contains("Flight number should be in format AA1234"));
        assert_eq!(s.app().flights().len(), 2);
    }

    #[test]
    fn test_run_reads_until_quit() {
        let mut s = session();
        let input = std::io::Cursor::new("connect\nstate\nquit\nconnect\n");
        let mut output = Vec::new();
        s.run(input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with("home> Wallet connected"));
        assert!(text.contains("Wallet: connected"));
        assert!(text.trim_end().ends_with("Bye."));
    }

    #[test]
    fn test_run_stops_at_end_of_input() {
        let mut s = session();
        let mut output = Vec::new();
        s.run(std::io::Cursor::new("connect"), &mut output).unwrap();
        assert!(s.app().wallet().is_connected());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_run_reports_write_failure() {
        let mut s = session();
        let result = s.run(std::io::Cursor::new("help\n"), BrokenPipe);
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_write_json() {
        let s = session();
        let mut output = Vec::new();
        write_json(&mut output, s.app().flights().all()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value[0]["record"]["flightNumber"], "AA123");
        assert!(output.ends_with(b"\n"));
    }

    #[test]
    fn test_write_json_reports_write_failure() {
        let result = write_json(&mut BrokenPipe, &[1, 2, 3]);
        assert!(matches!(result, Err(crate::Error::Io(_))));
    }

    #[test]
    fn test_quit() {
        let mut s = session();
        assert!(s.handle_line("quit").quit);
        assert!(!s.handle_line("help").quit);
    }

    #[test]
    fn test_unknown_command() {
        let mut s = session();
        let out = run(&mut s, &["fly"]);
        assert!(out[0].contains("Unknown command 'fly'"));
    }
}
