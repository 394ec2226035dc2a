use super::{DocumentCatalogEntry, ExamCatalogEntry, LegalReference, TrainingCatalogEntry};
use crate::alerts::domain::{DocumentKind, ExamKind};

pub(super) fn exam_entries() -> Vec<ExamCatalogEntry> {
    vec![
        ExamCatalogEntry {
            kind: ExamKind::Admission,
            name: ExamKind::Admission.label(),
            validity_days: 365,
            reference: LegalReference {
                norm: "NR-07 item 7.5.8",
                detail: "Performed before the employee starts work; the first periodic exam falls due within a year.",
            },
        },
        ExamCatalogEntry {
            kind: ExamKind::Periodic,
            name: ExamKind::Periodic.label(),
            validity_days: 365,
            reference: LegalReference {
                norm: "NR-07 item 7.5.8",
                detail: "Annual for workers exposed to occupational risks or with chronic conditions; biennial otherwise per PCMSO.",
            },
        },
        ExamCatalogEntry {
            kind: ExamKind::ReturnToWork,
            name: ExamKind::ReturnToWork.label(),
            validity_days: 365,
            reference: LegalReference {
                norm: "NR-07 item 7.5.9",
                detail: "Required on the first day back after a leave of 30 days or more for illness or accident.",
            },
        },
        ExamCatalogEntry {
            kind: ExamKind::ChangeOfFunction,
            name: ExamKind::ChangeOfFunction.label(),
            validity_days: 365,
            reference: LegalReference {
                norm: "NR-07 item 7.5.10",
                detail: "Required before a change of activity, workplace, or sector that alters risk exposure.",
            },
        },
        ExamCatalogEntry {
            kind: ExamKind::Dismissal,
            name: ExamKind::Dismissal.label(),
            validity_days: 135,
            reference: LegalReference {
                norm: "NR-07 item 7.5.11",
                detail: "Waived when the last clinical exam is within 135 days for risk degrees 1 and 2.",
            },
        },
    ]
}

pub(super) fn training_entries() -> Vec<TrainingCatalogEntry> {
    vec![
        TrainingCatalogEntry {
            code: "NR-05",
            name: "CIPA",
            validity_days: 365,
            workload_hours: 20,
            reference: LegalReference {
                norm: "NR-05 item 5.7",
                detail: "Committee members are trained for each annual mandate.",
            },
        },
        TrainingCatalogEntry {
            code: "NR-06",
            name: "Uso de EPI",
            validity_days: 365,
            workload_hours: 2,
            reference: LegalReference {
                norm: "NR-06 item 6.5.1",
                detail: "Employer must train workers on correct use, storage, and care of protective equipment.",
            },
        },
        TrainingCatalogEntry {
            code: "NR-10",
            name: "Segurança em Instalações e Serviços em Eletricidade",
            validity_days: 730,
            workload_hours: 40,
            reference: LegalReference {
                norm: "NR-10 item 10.8.8.2",
                detail: "Biennial refresher training, or sooner after a change of function or a leave over three months.",
            },
        },
        TrainingCatalogEntry {
            code: "NR-11",
            name: "Operação de Equipamentos de Transporte",
            validity_days: 365,
            workload_hours: 16,
            reference: LegalReference {
                norm: "NR-11 item 11.1.6",
                detail: "Forklift operators carry an identification card renewed with each refresher.",
            },
        },
        TrainingCatalogEntry {
            code: "NR-20",
            name: "Segurança com Inflamáveis e Combustíveis",
            validity_days: 730,
            workload_hours: 16,
            reference: LegalReference {
                norm: "NR-20 item 20.11.12",
                detail: "Intermediate-level refresher every two years.",
            },
        },
        TrainingCatalogEntry {
            code: "NR-33",
            name: "Espaços Confinados",
            validity_days: 365,
            workload_hours: 16,
            reference: LegalReference {
                norm: "NR-33 item 33.5.4",
                detail: "Authorized entrants and supervisors receive an annual refresher.",
            },
        },
        TrainingCatalogEntry {
            code: "NR-35",
            name: "Trabalho em Altura",
            validity_days: 730,
            workload_hours: 8,
            reference: LegalReference {
                norm: "NR-35 item 35.3.3",
                detail: "Periodic refresher every two years.",
            },
        },
    ]
}

pub(super) fn document_entries() -> Vec<DocumentCatalogEntry> {
    vec![
        DocumentCatalogEntry {
            kind: DocumentKind::Pgr,
            name: "Programa de Gerenciamento de Riscos",
            validity_days: 730,
            reference: LegalReference {
                norm: "NR-01 item 1.5.4.4.6",
                detail: "Risk assessment reviewed at least every two years.",
            },
        },
        DocumentCatalogEntry {
            kind: DocumentKind::Pcmso,
            name: "Programa de Controle Médico de Saúde Ocupacional",
            validity_days: 365,
            reference: LegalReference {
                norm: "NR-07 item 7.6.2",
                detail: "Annual analytical report prepared by the responsible physician.",
            },
        },
        DocumentCatalogEntry {
            kind: DocumentKind::Ltcat,
            name: "Laudo Técnico das Condições Ambientais do Trabalho",
            validity_days: 365,
            reference: LegalReference {
                norm: "IN INSS 128/2022",
                detail: "Updated at least annually or whenever the work environment changes.",
            },
        },
    ]
}
