use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use clinicdesk_core::models::patient::{NewPatient, PatientStatus, PatientUpdate};

#[derive(Debug, Subcommand)]
pub enum PatientsCommand {
    /// List patients page by page
    List {
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Name, email or phone fragment
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Show one patient
    Show { id: i64 },

    /// Register a new patient
    Create(PatientArgs),

    /// Change patient details; omitted fields stay as they are
    Update {
        id: i64,

        #[command(flatten)]
        fields: PatientUpdateArgs,
    },

    /// Switch a patient between active and inactive
    Toggle {
        id: i64,

        /// List page the patient is on
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Appointments of a patient
    History { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl From<StatusArg> for PatientStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => PatientStatus::Active,
            StatusArg::Inactive => PatientStatus::Inactive,
        }
    }
}

#[derive(Debug, Args)]
pub struct PatientArgs {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: String,

    #[arg(long)]
    pub gender: Option<String>,

    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub dob: Option<NaiveDate>,

    #[arg(long)]
    pub address: Option<String>,
}

impl From<PatientArgs> for NewPatient {
    fn from(args: PatientArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            gender: args.gender,
            date_of_birth: args.dob,
            address: args.address,
        }
    }
}

#[derive(Debug, Args)]
pub struct PatientUpdateArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub gender: Option<String>,

    #[arg(long)]
    pub dob: Option<NaiveDate>,

    #[arg(long)]
    pub address: Option<String>,
}

impl From<PatientUpdateArgs> for PatientUpdate {
    fn from(args: PatientUpdateArgs) -> Self {
        Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: args.email,
            phone: args.phone,
            gender: args.gender,
            date_of_birth: args.dob,
            address: args.address,
            status: None,
        }
    }
}
