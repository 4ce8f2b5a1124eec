use crate::models::question::Question;

const SAMPLE: [(&str, [&str; 4], &str); 7] = [
    (
        "What does CVE stand for?",
        [
            "Common Vulnerabilities and Exposures",
            "Critical Vulnerability Enumeration",
            "Common Vector Engine",
            "Cybersecurity Vulnerability Exception",
        ],
        "Common Vulnerabilities and Exposures",
    ),
    (
        "Which type of encryption uses a single key for both encryption and decryption?",
        [
            "Asymmetric Encryption",
            "Symmetric Encryption",
            "Public Key Encryption",
            "Hashing",
        ],
        "Symmetric Encryption",
    ),
    (
        "What is the OWASP Top 10?",
        [
            "A list of the 10 most profitable hacking tools",
            "A list of the 10 most critical web application security risks",
            "A list of the top 10 cybersecurity companies",
            "A ranking of the 10 best firewalls",
        ],
        "A list of the 10 most critical web application security risks",
    ),
    (
        "What is a 'Zero-Day Attack'?",
        [
            "An attack that happens on the first day of the month",
            "An attack that takes zero days to execute",
            "An attack that exploits a previously unknown vulnerability",
            "An attack with zero impact",
        ],
        "An attack that exploits a previously unknown vulnerability",
    ),
    (
        "What is the primary purpose of a hash value in cybersecurity?",
        [
            "To encrypt data so it can be decrypted later",
            "To create a unique, fixed-size output for verifying data integrity",
            "To hide data within an image file",
            "To generate a private key for asymmetric encryption",
        ],
        "To create a unique, fixed-size output for verifying data integrity",
    ),
    (
        "Which of these is a social engineering technique?",
        [
            "SQL Injection",
            "Cross-Site Scripting (XSS)",
            "Phishing",
            "Denial-of-Service (DoS)",
        ],
        "Phishing",
    ),
    (
        "In the context of security teams, what is a 'Purple Team'?",
        [
            "A team that only works on government contracts.",
            "A team of freelance hackers.",
            "A team that combines offensive (Red Team) and defensive (Blue Team) strategies.",
            "A team that specializes in breaking physical security.",
        ],
        "A team that combines offensive (Red Team) and defensive (Blue Team) strategies.",
    ),
];

/// Default heading used with the sample set.
pub const SAMPLE_HEADING: &str = "Cybersecurity Quiz";

/// Seven introductory cybersecurity questions, served before anything is generated.
pub fn sample_questions() -> Vec<Question> {
    SAMPLE
        .iter()
        .map(|(text, options, correct)| Question {
            question_text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct.to_string(),
        })
        .collect()
}
