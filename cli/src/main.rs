use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use triage_core::{PatientInput, TriageConfig};
use triage_engine::{analyze, explain, parse_patient, tokenize_input, KnowledgeBase};

#[derive(Parser, Debug)]
#[command(
    name = "triage-cli",
    about = "Xếp hạng bệnh có thể gặp từ danh sách triệu chứng."
)]
struct Args {
    /// Đường dẫn tới file JSON dữ liệu bệnh nhân.
    #[arg(short, long, conflicts_with = "symptoms")]
    input: Option<PathBuf>,

    /// Triệu chứng dạng văn bản, phân tách bằng dấu phẩy.
    #[arg(short, long)]
    symptoms: Option<String>,

    /// Cơ sở tri thức JSON thay cho bảng dựng sẵn.
    #[arg(short, long)]
    knowledge: Option<PathBuf>,

    /// Số chẩn đoán tối đa.
    #[arg(long)]
    max_diagnoses: Option<usize>,

    /// In chi tiết điểm của các chẩn đoán được chọn.
    #[arg(long)]
    explain: bool,

    /// In JSON gọn trên một dòng.
    #[arg(long)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let knowledge = match &args.knowledge {
        Some(path) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Không đọc được file {:?}", path))?;
            KnowledgeBase::from_json_str(&data)
                .with_context(|| format!("Cơ sở tri thức không hợp lệ: {:?}", path))?
        }
        None => KnowledgeBase::builtin(),
    };

    let patient = match (&args.input, &args.symptoms) {
        (Some(path), _) => {
            let data = std::fs::read_to_string(path)
                .with_context(|| format!("Không đọc được file {:?}", path))?;
            parse_patient(&data).with_context(|| format!("JSON không hợp lệ: {:?}", path))?
        }
        (None, Some(text)) => PatientInput::with_symptoms(text.as_str()),
        (None, None) => bail!("Cần --input hoặc --symptoms"),
    };

    let mut config = TriageConfig::default();
    if let Some(limit) = args.max_diagnoses {
        config.max_diagnoses = limit;
    }

    log::info!(
        "analyzing with {} conditions in the knowledge base",
        knowledge.len()
    );
    let report = analyze(&knowledge, &patient, &config);

    let rendered = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{rendered}");

    if args.explain {
        let tokens = tokenize_input(&patient.symptoms);
        eprintln!(
            "Risk: {} | tokens: {}",
            report.overall_risk().as_str(),
            tokens.tokens().join(" ")
        );
        for diagnosis in &report.diagnoses {
            if let Some(breakdown) = explain(&knowledge, &diagnosis.condition, &tokens, &config) {
                eprintln!(
                    "{} [{}]: {}",
                    diagnosis.condition,
                    diagnosis.urgency.as_str(),
                    serde_json::to_string(&breakdown)?
                );
            }
        }
    }

    Ok(())
}
