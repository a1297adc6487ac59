use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use medrec::api::{
    AppointmentDraft, ClinicApi, CmdMessage, MessageLevel, PatientDraft, PatientUpdate,
};
use medrec::config::{Backend, MedrecConfig};
use medrec::error::{MedrecError, Result};
use medrec::model::{Appointment, Patient};
use medrec::store::db::DbStore;
use medrec::store::fs::FileStore;
use medrec::store::RecordStore;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

mod args;
use args::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(&cli)?;
    let config = MedrecConfig::load(&data_dir).unwrap_or_default();
    let backend = cli.backend.map(Backend::from).unwrap_or(config.backend);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    // The backend is chosen once per run; everything past this point only
    // sees the ClinicApi facade.
    match backend {
        Backend::File => {
            let api = ClinicApi::open(FileStore::new(&data_dir))?;
            menu_loop(api, &mut input)
        }
        Backend::Database => {
            std::fs::create_dir_all(&data_dir)?;
            let store = DbStore::open(data_dir.join(&config.database_file))?;
            menu_loop(ClinicApi::open(store)?, &mut input)
        }
    }
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    let proj_dirs = ProjectDirs::from("com", "medrec", "medrec")
        .ok_or_else(|| MedrecError::Store("could not determine a data directory".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn menu_loop<S>(mut api: ClinicApi<S>, input: &mut impl BufRead) -> Result<()>
where
    S: RecordStore<Patient> + RecordStore<Appointment>,
{
    loop {
        print_menu();
        let Some(choice) = read_line(input)? else {
            // End of input is a normal exit, same as choosing 0.
            println!();
            return Ok(());
        };
        match choice.trim() {
            "1" => report(handle_add(&mut api, input)),
            "2" => report(handle_view_patients(&api)),
            "3" => report(handle_edit(&mut api, input)),
            "4" => report(handle_search(&api, input)),
            "5" => report(handle_schedule(&mut api, input)),
            "6" => report(handle_view_appointments(&api)),
            "0" => {
                println!("Exiting...");
                return Ok(());
            }
            other => println!("{}", format!("Invalid choice: {}", other).red()),
        }
    }
}

fn print_menu() {
    println!();
    println!("========= Clinic Records =========");
    println!("1. Add Patient");
    println!("2. View Patients");
    println!("3. Edit Patient");
    println!("4. Search Patient");
    println!("5. Schedule Appointment");
    println!("6. View Appointments");
    println!("0. Exit");
    prompt("Enter choice: ");
}

/// Print the outcome of one menu operation. Lookup misses are a plain
/// user message; everything else is an error line. Either way the menu
/// loop carries on.
fn report(outcome: Result<()>) {
    if let Err(err) = outcome {
        if err.is_not_found() {
            println!("{}", err.to_string().yellow());
        } else {
            println!("{}", format!("Error: {}", err).red());
        }
    }
}

fn handle_add<S>(api: &mut ClinicApi<S>, input: &mut impl BufRead) -> Result<()>
where
    S: RecordStore<Patient> + RecordStore<Appointment>,
{
    let name = prompt_text(input, "Name              : ")?;
    let age = prompt_number(input, "Age               : ")?;
    let gender = prompt_text(input, "Gender (M/F/O)    : ")?;
    let diagnosis = prompt_text(input, "Diagnosis         : ")?;

    let result = api.add_patient(PatientDraft {
        name,
        age,
        gender,
        diagnosis,
    })?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_view_patients<S>(api: &ClinicApi<S>) -> Result<()>
where
    S: RecordStore<Patient> + RecordStore<Appointment>,
{
    let result = api.list_patients()?;
    print_patients(&result.patients);
    Ok(())
}

fn handle_search<S>(api: &ClinicApi<S>, input: &mut impl BufRead) -> Result<()>
where
    S: RecordStore<Patient> + RecordStore<Appointment>,
{
    let id = prompt_number(input, "Enter Patient ID to search: ")?;
    let result = api.search_patient(id)?;
    for p in &result.patients {
        println!();
        println!("ID: {}", p.id);
        println!("Name: {}", p.name);
        println!("Age: {}", p.age);
        println!("Gender: {}", p.gender);
        println!("Diagnosis: {}", p.diagnosis);
    }
    Ok(())
}

fn handle_edit<S>(api: &mut ClinicApi<S>, input: &mut impl BufRead) -> Result<()>
where
    S: RecordStore<Patient> + RecordStore<Appointment>,
{
    let id = prompt_number(input, "Enter Patient ID to edit: ")?;
    // Blank (or 0 for age) keeps the previous value; there is no way to
    // set a field to blank/zero through an edit.
    let name = prompt_text(input, "New Name (blank to keep)      : ")?;
    let age = prompt_number_or_blank(input, "New Age (0 to keep)           : ")?;
    let gender = prompt_text(input, "New Gender (blank to keep)    : ")?;
    let diagnosis = prompt_text(input, "New Diagnosis (blank to keep) : ")?;

    let result = api.edit_patient(
        id,
        &PatientUpdate {
            name,
            age,
            gender,
            diagnosis,
        },
    )?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_schedule<S>(api: &mut ClinicApi<S>, input: &mut impl BufRead) -> Result<()>
where
    S: RecordStore<Patient> + RecordStore<Appointment>,
{
    let patient_id = prompt_number(input, "Patient ID          : ")?;
    let date = prompt_text(input, "Date (YYYY-MM-DD)   : ")?;
    let time = prompt_text(input, "Time (HH:MM)        : ")?;
    let doctor = prompt_text(input, "Doctor              : ")?;

    let result = api.schedule_appointment(AppointmentDraft {
        patient_id,
        date,
        time,
        doctor,
    })?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_view_appointments<S>(api: &ClinicApi<S>) -> Result<()>
where
    S: RecordStore<Patient> + RecordStore<Appointment>,
{
    let result = api.list_appointments()?;
    print_appointments(&result.appointments);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

const NAME_COL: usize = 25;
const DOCTOR_COL: usize = 20;

fn print_patients(patients: &[Patient]) {
    if patients.is_empty() {
        println!("No patients yet.");
        return;
    }
    println!();
    println!(
        "{:<4} {} {:<4} {:<8} {}",
        "ID",
        pad_to_width("Name", NAME_COL),
        "Age",
        "Gender",
        "Diagnosis"
    );
    for p in patients {
        println!(
            "{:<4} {} {:<4} {:<8} {}",
            p.id,
            pad_to_width(&p.name, NAME_COL),
            p.age,
            p.gender,
            p.diagnosis
        );
    }
}

fn print_appointments(appointments: &[Appointment]) {
    if appointments.is_empty() {
        println!("No appointments.");
        return;
    }
    println!();
    println!(
        "{:<6} {:<6} {:<12} {:<6} {}",
        "ID",
        "P_ID",
        "Date",
        "Time",
        pad_to_width("Doctor", DOCTOR_COL)
    );
    for a in appointments {
        println!(
            "{:<6} {:<6} {:<12} {:<6} {}",
            a.id,
            a.patient_id,
            a.date,
            a.time,
            pad_to_width(&a.doctor, DOCTOR_COL)
        );
    }
}

/// Truncate to a display width (ellipsis on overflow), then pad with
/// spaces so columns line up even with multi-width characters.
fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width.saturating_sub(1) && s.width() > width {
            out.push('…');
            used += 1;
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn prompt(label: &str) {
    print!("{}", label);
    let _ = io::stdout().flush();
}

/// One line of input, or `None` at end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn prompt_text(input: &mut impl BufRead, label: &str) -> Result<String> {
    prompt(label);
    read_line(input)?
        .ok_or_else(|| MedrecError::InvalidInput("unexpected end of input".to_string()))
}

fn prompt_number(input: &mut impl BufRead, label: &str) -> Result<u32> {
    let raw = prompt_text(input, label)?;
    raw.trim()
        .parse()
        .map_err(|_| MedrecError::InvalidInput(format!("expected a number, got {:?}", raw.trim())))
}

/// Like [`prompt_number`], but a blank line means 0 ("keep previous").
fn prompt_number_or_blank(input: &mut impl BufRead, label: &str) -> Result<u32> {
    let raw = prompt_text(input, label)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse()
        .map_err(|_| MedrecError::InvalidInput(format!("expected a number, got {:?}", raw)))
}
