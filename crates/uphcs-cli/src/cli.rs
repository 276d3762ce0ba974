use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use jiff::civil::Date;
use uphcs_core::dates::parse_date;
use uphcs_core::models::document::DocumentKind;
use uphcs_core::models::user::Role;
use uphcs_workflow::reminders::ReminderTab;

#[derive(Parser)]
#[command(name = "uphcs")]
#[command(version)]
#[command(about = "Behavioral-health case management from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (defaults to <config dir>/uphcs/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long, env = "UPHCS_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the session token and clinic selection
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List or select the clinic you operate against
    Clinic {
        #[command(subcommand)]
        command: ClinicCommand,
    },

    /// Patient lists for the selected clinic
    Patients {
        #[command(subcommand)]
        command: PatientsCommand,
    },

    /// One patient's records
    Patient {
        #[command(subcommand)]
        command: PatientCommand,
    },

    /// Record a PHQ-9/GAD-7 assessment
    Assess {
        #[command(subcommand)]
        stage: AssessCommand,
    },

    /// Record a contact attempt
    Contact {
        patient_id: i64,
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
        #[arg(long)]
        minutes: Option<i64>,
        /// by_phone, by_video, or in_clinic
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },

    /// Submit a patient intake
    Intake {
        patient_id: i64,
        /// Intake questionnaire as JSON; a blank form is used when omitted
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
        #[arg(long)]
        minutes: Option<i64>,
        #[arg(long)]
        safety_plan_discussed: bool,
    },

    /// Record a psychiatric consultation
    Consult {
        patient_id: i64,
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
        #[arg(long)]
        minutes: Option<i64>,
        #[arg(long)]
        recommendations: Option<String>,
        #[arg(long)]
        treatment_plan: Option<String>,
        #[arg(long)]
        medications: Option<String>,
        /// Date of the next follow-up; implies one is needed
        #[arg(long, value_parser = parse_date)]
        follow_up: Option<Date>,
    },

    /// Reminder list and actions
    Reminders {
        #[command(subcommand)]
        command: RemindersCommand,
    },

    /// Generated PDF documents
    Documents {
        #[command(subcommand)]
        command: DocumentsCommand,
    },

    /// Enroll a patient in the selected clinic
    Enroll(EnrollArgs),

    /// Staff of the selected clinic, for enrollment
    Staff {
        #[arg(value_enum)]
        kind: StaffArg,
    },

    /// Clinic or caseload summary for your role
    Summary,

    /// User and clinic administration
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand)]
pub enum ClinicCommand {
    List,
    Select { clinic_id: i64 },
}

/// Search, sort, and paging shared by every list.
#[derive(Args, Clone, Debug, Default)]
pub struct ListArgs {
    /// Case-insensitive match on names and MRN, substring match on id
    #[arg(long, default_value = "")]
    pub search: String,
    /// Column to sort by
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// One-based page number
    #[arg(long, default_value_t = 1)]
    pub page: usize,
    #[arg(long)]
    pub per_page: Option<usize>,
}

#[derive(Subcommand)]
pub enum PatientsCommand {
    Active(ListArgs),
    Inactive(ListArgs),
    Enrolled(ListArgs),
    /// Patients assigned to you as psychiatric consultant
    Assigned(ListArgs),
}

#[derive(Subcommand)]
pub enum PatientCommand {
    /// The patient dashboard
    Show { patient_id: i64 },
    /// Contact-attempt history
    Contacts {
        patient_id: i64,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Psychiatric consultations and care-manager notes
    Consults { patient_id: i64 },
}

#[derive(Args)]
pub struct AssessArgs {
    pub patient_id: i64,
    #[arg(long, value_parser = parse_date)]
    pub date: Option<Date>,
    /// Nine comma-separated answers, each 0-3
    #[arg(long, value_delimiter = ',')]
    pub phq9: Vec<u8>,
    /// Seven comma-separated answers, each 0-3
    #[arg(long, value_delimiter = ',')]
    pub gad7: Vec<u8>,
    #[arg(long)]
    pub session_type: Option<String>,
    /// Session length in minutes
    #[arg(long)]
    pub duration: Option<i64>,
    /// Flag for discussion with the psychiatric consultant
    #[arg(long)]
    pub discuss: bool,
    #[arg(long)]
    pub consultant_id: Option<String>,
    #[arg(long)]
    pub consultant_notes: Option<String>,
}

#[derive(Subcommand)]
pub enum AssessCommand {
    Initial(AssessArgs),
    FollowUp(AssessArgs),
}

#[derive(Subcommand)]
pub enum RemindersCommand {
    List {
        /// all, overdue, today, or upcoming
        #[arg(long, default_value = "all")]
        status: ReminderTab,
        /// Reminders for one patient instead of your whole caseload
        #[arg(long)]
        patient: Option<i64>,
    },
    Complete {
        reminder_id: i64,
        #[arg(long)]
        patient: Option<i64>,
    },
    Dismiss {
        reminder_id: i64,
        #[arg(long)]
        patient: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum DocumentsCommand {
    List {
        patient_id: i64,
        /// Match folder or file names
        #[arg(long)]
        search: Option<String>,
    },
    Export {
        patient_id: i64,
        #[arg(long, value_parser = parse_date)]
        date: Date,
        /// PHQ-9, GAD-7, Contact_Attempt, or Safety_Plan
        #[arg(long)]
        kind: DocumentKind,
        /// Directory to write the PDF into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

#[derive(Args)]
pub struct EnrollArgs {
    #[arg(long)]
    pub mrn: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long, value_parser = parse_date)]
    pub dob: Option<Date>,
    #[arg(long, value_parser = parse_date)]
    pub enrollment_date: Option<Date>,
    #[arg(long)]
    pub care_manager: Option<String>,
    #[arg(long)]
    pub consultant: Option<String>,
    #[arg(long)]
    pub pcp: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StaffArg {
    CareManagers,
    Consultants,
    Pcps,
}

#[derive(Args)]
pub struct UserArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long, env = "UPHCS_NEW_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    /// Admin, BHCM, or Psychiatric Consultant
    #[arg(long)]
    pub role: Option<Role>,
    #[arg(long = "clinic", value_delimiter = ',')]
    pub clinics: Vec<i64>,
}

#[derive(Args)]
pub struct ClinicArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub address: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long)]
    pub organization: Option<i64>,
}

#[derive(Subcommand)]
pub enum AdminCommand {
    Users,
    Roles,
    Clinics,
    AddUser(UserArgs),
    UpdateUser {
        user_id: i64,
        #[command(flatten)]
        user: UserArgs,
    },
    DeleteUser { user_id: i64 },
    AddClinic(ClinicArgs),
    UpdateClinic {
        clinic_id: i64,
        #[command(flatten)]
        clinic: ClinicArgs,
    },
    DeleteClinic { clinic_id: i64 },
}
