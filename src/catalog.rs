use crate::models::{Exam, ExamLevel};

pub static AWS_EXAMS: [Exam; 6] = [
    Exam {
        code: "CLF-C02",
        name: "Cloud Practitioner",
        level: ExamLevel::Foundational,
        description: "Overall understanding of the AWS Cloud platform.",
        color: "gray",
    },
    Exam {
        code: "SAA-C03",
        name: "Solutions Architect - Associate",
        level: ExamLevel::Associate,
        description: "Designing distributed systems on AWS.",
        color: "blue",
    },
    Exam {
        code: "DVA-C02",
        name: "Developer - Associate",
        level: ExamLevel::Associate,
        description: "Developing and maintaining applications on AWS.",
        color: "cyan",
    },
    Exam {
        code: "SOA-C02",
        name: "SysOps Administrator - Associate",
        level: ExamLevel::Associate,
        description: "Deployment, management, and operations on AWS.",
        color: "teal",
    },
    Exam {
        code: "SAP-C02",
        name: "Solutions Architect - Professional",
        level: ExamLevel::Professional,
        description: "Designing complex and scalable systems.",
        color: "indigo",
    },
    Exam {
        code: "DOP-C02",
        name: "DevOps Engineer - Professional",
        level: ExamLevel::Professional,
        description: "Provisioning, operating, and managing distributed application systems.",
        color: "violet",
    },
];

pub fn find_exam(code: &str) -> Option<&'static Exam> {
    AWS_EXAMS.iter().find(|e| e.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_codes_are_unique() {
        for (i, exam) in AWS_EXAMS.iter().enumerate() {
            assert!(AWS_EXAMS[i + 1..].iter().all(|e| e.code != exam.code));
        }
    }

    #[test]
    fn test_find_exam() {
        assert_eq!(find_exam("SAA-C03").unwrap().level, ExamLevel::Associate);
        assert!(find_exam("XYZ-C01").is_none());
    }
}
