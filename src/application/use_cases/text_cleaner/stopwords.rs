use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Hand-curated function words and chat filler found in app reviews.
const BASELINE_WORDS: &[&str] = &[
    "yang", "dan", "di", "ke", "dari", "ini", "itu", "ada", "atau", "untuk", "dengan", "pada",
    "saya", "aku", "kamu", "dia", "mereka", "kami", "kita", "nya", "lah", "kok", "sih", "nih",
    "ya", "iya", "aja", "deh", "dong", "min", "admin", "aplikasi", "app", "ga", "gak", "nggak",
    "tdk", "tidak", "bukan", "udah", "sudah", "belum", "bgt", "banget", "bisa", "dapat", "dapet",
    "kalo", "kalau", "karena", "jadi", "sebagai", "juga", "lagi", "lg", "pun", "akan", "lebih",
    "masih", "sangat", "harus", "mau", "mohon", "tolong", "terima", "kasih", "terimakasih",
    "halo", "selamat",
];

/// General Indonesian stopwords added by the extended backend.
const EXTENDED_WORDS: &[&str] = &[
    "para", "namun", "menurut", "antara", "dua", "ia", "seperti", "jika", "sehingga", "kembali",
    "kepada", "oleh", "saat", "sementara", "setelah", "sekitar", "bagi", "serta", "telah", "hal",
    "ketika", "adalah", "dalam", "bahwa", "hanya", "terhadap", "secara", "agar", "lain", "anda",
    "begitu", "mengapa", "kenapa", "yaitu", "yakni", "daripada", "itulah", "maka", "tentang",
    "demi", "dimana", "kemana", "pula", "sambil", "sebelum", "sesudah", "supaya", "guna", "kah",
    "sampai", "sedangkan", "selagi", "tetapi", "apakah", "kecuali", "sebab", "selain", "seolah",
    "seraya", "seterusnya", "tanpa", "agak", "boleh", "dsb", "dst", "dll", "dahulu", "dulunya",
    "anu", "demikian", "tapi", "ingin", "mari", "nanti", "melainkan", "oh", "ok", "seharusnya",
    "sebetulnya", "setiap", "setidaknya", "sesuatu", "pasti", "saja", "toh", "walau", "tentu",
    "amat", "apalagi", "bagaimanapun",
];

pub static BASELINE_STOPWORDS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| BASELINE_WORDS.iter().copied().collect());

pub static EXTENDED_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    BASELINE_WORDS
        .iter()
        .chain(EXTENDED_WORDS.iter())
        .copied()
        .collect()
});
