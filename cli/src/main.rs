mod api;
mod render;
mod store;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use booking::admin::{RoomConsole, RoomForm, RoomFormMode, load_room_for_edit, save_room, view_room};
use booking::checkout::{Checkout, CheckoutDraft, hosted_return};
use booking::model::{Credentials, Registration};
use booking::report::{REPORT_FILE_NAME, fetch_report};
use booking::reservations::{Cancellation, ReservationBook};
use booking::search::{SearchForm, SearchOutcome, search_availability};
use booking::{ApiError, BookingError, DateRange, Decision, HotelApi, RoomType, Session};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::api::ReqwestApi;
use crate::store::FileStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Booking(#[from] BookingError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("{0}")]
    Usage(String),
    #[error("io failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "hotel-cli", about = "Hotel booking terminal client")]
struct Cli {
    #[arg(long, env = "HOTEL_API_URL", default_value = "http://localhost:8080")]
    base_url: String,

    #[arg(long, env = "HOTEL_SESSION_FILE", default_value = ".hotel-session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HOTEL_PASSWORD")]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long, env = "HOTEL_PASSWORD")]
        password: String,
        #[arg(long)]
        name: String,
    },
    Logout,
    Whoami,
    /// List every room.
    Rooms,
    /// Show one room.
    Room { id: i64 },
    Search(SearchArgs),
    Reservations(ReservationsCommand),
    Checkout(CheckoutCommand),
    Admin(AdminCommand),
    Report(ReportCommand),
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[arg(long)]
    destination: String,
    #[arg(long)]
    guests: u8,
    #[arg(long = "type", value_parser = parse_room_type)]
    room_type: Option<RoomType>,
    #[arg(long)]
    from: NaiveDate,
    #[arg(long)]
    to: NaiveDate,
}

#[derive(Args, Debug)]
struct StayArgs {
    #[arg(long)]
    from: NaiveDate,
    #[arg(long)]
    to: NaiveDate,
}

#[derive(Args, Debug)]
struct ReservationsCommand {
    #[command(subcommand)]
    command: ReservationsSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReservationsSubcommand {
    List,
    Create {
        #[arg(long)]
        room: i64,
        #[command(flatten)]
        stay: StayArgs,
    },
    Edit {
        id: i64,
        #[command(flatten)]
        stay: StayArgs,
    },
    Cancel {
        id: i64,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
struct CheckoutCommand {
    #[command(subcommand)]
    command: CheckoutSubcommand,
}

#[derive(Subcommand, Debug)]
enum CheckoutSubcommand {
    /// Print the hosted payment URL for a stay.
    Pay {
        #[arg(long)]
        room: i64,
        #[command(flatten)]
        stay: StayArgs,
    },
    /// Confirm a stay from the hosted provider's return parameters.
    Confirm {
        #[arg(long)]
        room: i64,
        #[command(flatten)]
        stay: StayArgs,
        #[arg(long, default_value = "approved")]
        status: String,
        #[arg(long)]
        payment_id: String,
        #[arg(long, help = "Receipt path; defaults to the receipt's own file name")]
        receipt: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    /// Room console with occupancy for a day (default today).
    Rooms {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    Show {
        id: i64,
    },
    Create(RoomFields),
    Update {
        id: i64,
        #[command(flatten)]
        fields: RoomFields,
    },
    Delete {
        id: i64,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
struct RoomFields {
    #[arg(long)]
    number: Option<String>,
    #[arg(long = "type")]
    room_type: Option<String>,
    #[arg(long)]
    capacity: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image_url: Option<String>,
}

impl RoomFields {
    /// Overlay the provided fields on `form`.
    fn apply(self, form: &mut RoomForm) {
        let pairs = [
            (self.number, &mut form.number),
            (self.room_type, &mut form.room_type),
            (self.capacity, &mut form.capacity),
            (self.price, &mut form.price),
            (self.description, &mut form.description),
            (self.image_url, &mut form.image_url),
        ];
        for (value, slot) in pairs {
            if let Some(value) = value {
                *slot = value;
            }
        }
    }
}

#[derive(Args, Debug)]
struct ReportCommand {
    #[command(subcommand)]
    command: ReportSubcommand,
}

#[derive(Subcommand, Debug)]
enum ReportSubcommand {
    Summary,
    Export {
        #[arg(long, default_value = REPORT_FILE_NAME)]
        output: PathBuf,
    },
}

struct CliContext {
    api: ReqwestApi,
    store: FileStore,
    session: Session,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let store = FileStore::new(cli.session_file);
    let session = Session::load(&store);
    let mut ctx = CliContext { api: ReqwestApi::new(cli.base_url), store, session };
    tracing::debug!(base_url = ctx.api.base_url(), session = %ctx.store.path().display(), "hotel-cli starting");

    match cli.command {
        Command::Login { email, password } => run_login(&mut ctx, Credentials { email, password }).await,
        Command::Register { email, password, name } => {
            ctx.api.register(&Registration { email, password, name }).await?;
            println!("registered; sign in with `hotel-cli login`");
            Ok(())
        }
        Command::Logout => {
            ctx.session.logout(&ctx.store);
            println!("signed out");
            Ok(())
        }
        Command::Whoami => {
            match &ctx.session.identity {
                Some(identity) => println!(
                    "{} ({})",
                    identity.display_name.as_deref().unwrap_or("signed in"),
                    identity.role.as_wire()
                ),
                None => println!("not signed in"),
            }
            Ok(())
        }
        Command::Rooms => {
            for room in ctx.api.list_rooms().await? {
                println!("{}", render::room_line(&room));
            }
            Ok(())
        }
        Command::Room { id } => {
            let room = ctx.api.room(id).await?;
            println!("{}", render::room_line(&room));
            println!("{}", room.description);
            Ok(())
        }
        Command::Search(args) => run_search(&ctx, args).await,
        Command::Reservations(cmd) => run_reservations(&ctx, cmd).await,
        Command::Checkout(cmd) => run_checkout(&ctx, cmd).await,
        Command::Admin(cmd) => run_admin(&ctx, cmd).await,
        Command::Report(cmd) => run_report(&ctx, cmd).await,
    }
}

async fn run_login(ctx: &mut CliContext, credentials: Credentials) -> Result<(), CliError> {
    let auth = ctx.api.login(&credentials).await?;
    let identity = ctx.session.login(&ctx.store, auth);
    println!(
        "signed in as {} ({})",
        identity.display_name.as_deref().unwrap_or(&credentials.email),
        identity.role.as_wire()
    );
    Ok(())
}

async fn run_search(ctx: &CliContext, args: SearchArgs) -> Result<(), CliError> {
    let mut form = SearchForm::new(args.from);
    form.destination = args.destination;
    form.set_party_size(Some(args.guests));
    if args.room_type.is_some() {
        form.room_type = args.room_type;
    }
    form.start = Some(args.from);
    form.end = Some(args.to);

    match search_availability(&ctx.api, &ctx.session, &form).await {
        SearchOutcome::LoginRequired => Err(BookingError::LoginRequired.into()),
        SearchOutcome::Invalid(errors) => Err(BookingError::Invalid(errors).into()),
        SearchOutcome::NoResults => {
            println!("no rooms available for those dates");
            Ok(())
        }
        SearchOutcome::Found(results) => {
            let nights = results.range.nights();
            println!("{} room(s), {nights} night(s)", results.rooms.len());
            for room in &results.rooms {
                println!("{}", render::room_line(room));
            }
            Ok(())
        }
        SearchOutcome::Failed(err) => Err(err.into()),
    }
}

async fn run_reservations(ctx: &CliContext, cmd: ReservationsCommand) -> Result<(), CliError> {
    let mut book = ReservationBook::default();
    match cmd.command {
        ReservationsSubcommand::List => {
            book.refresh(&ctx.api, &ctx.session).await?;
            if book.entries().is_empty() {
                println!("no reservations");
            }
            for reservation in book.entries() {
                println!("{}", render::reservation_line(reservation));
            }
        }
        ReservationsSubcommand::Create { room, stay } => {
            book.create(&ctx.api, &ctx.session, room, stay_range(&stay)?).await?;
            println!("reservation created");
            for reservation in book.entries() {
                println!("{}", render::reservation_line(reservation));
            }
        }
        ReservationsSubcommand::Edit { id, stay } => {
            let message = book.edit(&ctx.api, &ctx.session, id, stay_range(&stay)?).await?;
            println!("{message}");
        }
        ReservationsSubcommand::Cancel { id, yes } => {
            ctx.session.require_token().map_err(CliError::from)?;
            let decision = confirm(yes, &format!("Cancel reservation #{id}?"))?;
            match book.cancel(&ctx.api, &ctx.session, id, decision).await? {
                Cancellation::Cancelled => println!("reservation {id} cancelled"),
                Cancellation::Kept => println!("kept reservation {id}"),
            }
        }
    }
    Ok(())
}

async fn run_checkout(ctx: &CliContext, cmd: CheckoutCommand) -> Result<(), CliError> {
    match cmd.command {
        CheckoutSubcommand::Pay { room, stay } => {
            let mut checkout = start_checkout(ctx, room, &stay).await?;
            let url = checkout.start_hosted_payment(&ctx.api, &ctx.session).await?;
            println!("{url}");
            Ok(())
        }
        CheckoutSubcommand::Confirm { room, stay, status, payment_id, receipt } => {
            let payment = hosted_return([("status", status), ("payment_id", payment_id)])?;
            let mut checkout = start_checkout(ctx, room, &stay).await?;
            let confirmed = checkout.confirm(&ctx.api, &ctx.session, payment).await?;
            let path = receipt.unwrap_or_else(|| PathBuf::from(confirmed.file_name()));
            let text = confirmed.render_text();
            std::fs::write(&path, &text)?;
            print!("{text}");
            println!("receipt written to {}", path.display());
            Ok(())
        }
    }
}

/// Fetch the room and open a quoted checkout for `stay`.
async fn start_checkout(ctx: &CliContext, room_id: i64, stay: &StayArgs) -> Result<Checkout, CliError> {
    ctx.session.require_token().map_err(CliError::from)?;
    let range = stay_range(stay)?;
    let room = ctx.api.room(room_id).await?;
    let mut checkout = Checkout::new(CheckoutDraft::new(room, range));
    let quote = checkout.quote()?;
    println!(
        "{} night(s) at {} = {}",
        quote.nights,
        booking::model::format_money(quote.price_per_night),
        booking::model::format_money(quote.total)
    );
    Ok(checkout)
}

async fn run_admin(ctx: &CliContext, cmd: AdminCommand) -> Result<(), CliError> {
    match cmd.command {
        AdminSubcommand::Rooms { date } => {
            let day = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let mut console = RoomConsole::default();
            console.load(&ctx.api, &ctx.session).await?;
            console.refresh_occupancy(&ctx.api, &ctx.session, day).await?;
            println!("occupancy for {day}");
            for room in console.rooms() {
                println!("{}", render::room_with_occupancy(room, console.occupancy(room.id)));
            }
        }
        AdminSubcommand::Show { id } => {
            let room = view_room(&ctx.api, &ctx.session, id).await?;
            println!("{}", render::room_line(&room));
            println!("{}", room.description);
            println!("{}", room.image_url);
        }
        AdminSubcommand::Create(fields) => {
            let mut form = RoomForm::default();
            fields.apply(&mut form);
            println!("{}", save_room(&ctx.api, &ctx.session, RoomFormMode::Create, &form).await?);
        }
        AdminSubcommand::Update { id, fields } => {
            let mut form = load_room_for_edit(&ctx.api, &ctx.session, id).await?;
            fields.apply(&mut form);
            println!("{}", save_room(&ctx.api, &ctx.session, RoomFormMode::Edit(id), &form).await?);
        }
        AdminSubcommand::Delete { id, yes } => {
            ctx.session.require(booking::Capability::ManageRooms).map_err(CliError::from)?;
            let decision = confirm(yes, &format!("Delete room #{id}?"))?;
            let mut console = RoomConsole::default();
            match console.delete(&ctx.api, &ctx.session, id, decision).await? {
                booking::admin::Deletion::Deleted => println!("room {id} deleted"),
                booking::admin::Deletion::Kept => println!("kept room {id}"),
            }
        }
    }
    Ok(())
}

async fn run_report(ctx: &CliContext, cmd: ReportCommand) -> Result<(), CliError> {
    let report = fetch_report(&ctx.api, &ctx.session).await?;
    match cmd.command {
        ReportSubcommand::Summary => {
            for line in render::summary_lines(&report.summary()) {
                println!("{line}");
            }
        }
        ReportSubcommand::Export { output } => {
            std::fs::write(&output, report.raw())?;
            println!("{} record(s) written to {}", report.records().len(), output.display());
        }
    }
    Ok(())
}

fn stay_range(stay: &StayArgs) -> Result<DateRange, CliError> {
    DateRange::new(stay.from, stay.to).map_err(|e| CliError::Usage(e.message))
}

fn parse_room_type(raw: &str) -> Result<RoomType, String> {
    RoomType::parse(raw).ok_or_else(|| format!("unknown room type `{raw}`; use simple, doble, triple or suite"))
}

/// `--yes` confirms; otherwise ask on the terminal.
fn confirm(yes: bool, prompt: &str) -> Result<Decision, CliError> {
    if yes {
        return Ok(Decision::Confirmed);
    }
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(decision_from_answer(&answer))
}

fn decision_from_answer(answer: &str) -> Decision {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Decision::Confirmed,
        _ => Decision::Dismissed,
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;
