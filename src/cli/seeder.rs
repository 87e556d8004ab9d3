use chrono::NaiveDate;
use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::name::en::Name;
use sqlx::PgPool;
use uuid::Uuid;

use crate::modules::users::model::UserRole;

const SEED_PASSWORD: &str = "password123";
const TEACHERS: usize = 3;
const PARENTS: usize = 10;
const STUDENTS_PER_CLASS: usize = 10;
const ACADEMIC_YEAR: &str = "2025-2026";

/// Seeds demo data: teachers, parents, classes, subjects, students, and
/// pending fees. Skips entirely when students already exist, so running it
/// twice is harmless.
pub async fn seed_database(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM students")
        .fetch_one(db)
        .await?;
    if existing > 0 {
        println!("Database already seeded ({} students), skipping", existing);
        return Ok(());
    }

    // One cheap hash shared across all demo accounts.
    let password_hash = bcrypt::hash(SEED_PASSWORD, 4)?;

    let mut teacher_ids = Vec::with_capacity(TEACHERS);
    for i in 0..TEACHERS {
        let id = insert_user(
            db,
            &format!("teacher{}@classhive.test", i + 1),
            &password_hash,
            UserRole::Teacher,
        )
        .await?;
        teacher_ids.push(id);
    }

    let mut parent_ids = Vec::with_capacity(PARENTS);
    for i in 0..PARENTS {
        let id = insert_user(
            db,
            &format!("parent{}@classhive.test", i + 1),
            &password_hash,
            UserRole::Parent,
        )
        .await?;
        parent_ids.push(id);
    }

    let subject_ids = insert_subjects(db).await?;

    let mut class_ids = Vec::with_capacity(TEACHERS);
    for (i, teacher_id) in teacher_ids.iter().enumerate() {
        let class_id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO classes (class_name, section, class_teacher, academic_year, room)
             VALUES ($1, 'A', $2, $3, $4)
             RETURNING id",
        )
        .bind(format!("Grade {}", i + 5))
        .bind(teacher_id)
        .bind(ACADEMIC_YEAR)
        .bind(format!("R-{}", 100 + i))
        .fetch_one(db)
        .await?;

        for subject_id in &subject_ids {
            sqlx::query(
                "INSERT INTO class_subjects (class_id, subject_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(class_id)
            .bind(subject_id)
            .execute(db)
            .await?;

            sqlx::query(
                "INSERT INTO teacher_subjects (teacher_id, subject_id)
                 VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(teacher_id)
            .bind(subject_id)
            .execute(db)
            .await?;
        }

        class_ids.push(class_id);
    }

    let mut seq = 0usize;
    for class_id in &class_ids {
        for _ in 0..STUDENTS_PER_CLASS {
            seq += 1;
            let name: String = Name().fake();
            let parent_id = parent_ids[seq % parent_ids.len()];
            let dob = NaiveDate::from_ymd_opt(
                (2012..2016).fake::<i32>(),
                (1..13).fake::<u32>(),
                (1..29).fake::<u32>(),
            )
            .ok_or("Generated an invalid date of birth")?;

            let student_id = sqlx::query_scalar::<_, Uuid>(
                "INSERT INTO students
                     (name, roll_number, parent_id, class_id, admission_number,
                      date_of_birth, gender, address)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                 RETURNING id",
            )
            .bind(&name)
            .bind(format!("RN-{:04}", seq))
            .bind(parent_id)
            .bind(class_id)
            .bind(format!("ADM-{:04}", seq))
            .bind(dob)
            .bind(if seq % 2 == 0 { "male" } else { "female" })
            .bind(CityName().fake::<String>())
            .fetch_one(db)
            .await?;

            sqlx::query(
                "INSERT INTO fees (student_id, academic_year, fee_type, amount, due_date)
                 VALUES ($1, $2, 'tuition', 1500, CURRENT_DATE + 30)",
            )
            .bind(student_id)
            .bind(ACADEMIC_YEAR)
            .execute(db)
            .await?;
        }
    }

    println!(
        "Seeded {} teachers, {} parents, {} classes, {} students (password: {})",
        TEACHERS,
        PARENTS,
        class_ids.len(),
        seq,
        SEED_PASSWORD
    );
    Ok(())
}

async fn insert_user(
    db: &PgPool,
    email: &str,
    password_hash: &str,
    role: UserRole,
) -> Result<Uuid, Box<dyn std::error::Error>> {
    let name: String = Name().fake();
    let id = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, password, role, name, phone)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id",
    )
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .bind(&name)
    .bind(format!("+1555{:07}", (0..9_999_999).fake::<i32>()))
    .fetch_one(db)
    .await?;
    Ok(id)
}

async fn insert_subjects(db: &PgPool) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let subjects = [
        ("Mathematics", "MATH", "core"),
        ("English", "ENG", "core"),
        ("Science", "SCI", "core"),
        ("Art", "ART", "activity"),
        ("Physical Education", "PE", "activity"),
    ];

    let mut ids = Vec::with_capacity(subjects.len());
    for (name, code, kind) in subjects {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO subjects (name, code, kind)
             VALUES ($1, $2, $3)
             ON CONFLICT (code) DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(name)
        .bind(code)
        .bind(kind)
        .fetch_one(db)
        .await?;
        ids.push(id);
    }
    Ok(ids)
}
