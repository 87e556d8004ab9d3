use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::attendance::model::{
    Attendance, AttendanceStatus, AttendanceWithStudent, BulkAttendanceEntry, BulkFailure,
    BulkMarkDto, BulkMarkOutcome, MarkAttendanceDto, StatusTally, TodaySummary,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{LoginRequest, LoginResponse, RegisterRequest};
use crate::modules::classes::model::{
    Class, ClassWithSubjects, ClassWithTeacher, CreateClassDto, SubjectRef, UpdateClassDto,
};
use crate::modules::fees::model::{
    CreateFeeDto, Fee, FeeStatusSummary, PayFeeDto, UpdateFeeStatusDto,
};
use crate::modules::gallery::model::{CreateGalleryItemDto, GalleryItem};
use crate::modules::reports::model::{
    ClassAttendanceRow, DashboardCounts, FeeStatusRow, StudentStatusRow,
};
use crate::modules::students::model::{
    CreateStudentDto, Student, StudentWithClass, StudentWithParent, UpdateStudentDto,
};
use crate::modules::subjects::controller::AssignSubjectsDto;
use crate::modules::subjects::model::{CreateSubjectDto, Subject, UpdateSubjectDto};
use crate::modules::timetable::model::{CreateTimetableEntryDto, TimetableEntry, TimetableSlot};
use crate::modules::users::model::{
    CreateUserDto, UpdateProfileDto, UpdateUserDto, User, UserRole,
};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::me,
        crate::modules::auth::controller::update_profile,
        crate::modules::auth::controller::logout,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::students::controller::get_students_by_class,
        crate::modules::students::controller::get_student_details,
        crate::modules::students::controller::get_children,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::classes::controller::get_my_classes,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::subjects::controller::assign_subjects,
        crate::modules::subjects::controller::get_my_subjects,
        crate::modules::subjects::controller::get_my_assignments,
        crate::modules::attendance::controller::mark_attendance,
        crate::modules::attendance::controller::mark_bulk_attendance,
        crate::modules::attendance::controller::get_class_attendance,
        crate::modules::attendance::controller::get_today_summary,
        crate::modules::attendance::controller::get_student_attendance,
        crate::modules::attendance::controller::get_child_attendance,
        crate::modules::attendance::controller::get_child_progress,
        crate::modules::fees::controller::get_fees,
        crate::modules::fees::controller::create_fee,
        crate::modules::fees::controller::get_student_fees,
        crate::modules::fees::controller::update_fee_status,
        crate::modules::fees::controller::get_child_fees,
        crate::modules::fees::controller::pay_fee,
        crate::modules::timetable::controller::get_timetable,
        crate::modules::timetable::controller::create_timetable_entry,
        crate::modules::timetable::controller::delete_timetable_entry,
        crate::modules::gallery::controller::create_gallery_item,
        crate::modules::gallery::controller::delete_gallery_item,
        crate::modules::gallery::controller::get_gallery,
        crate::modules::reports::controller::get_dashboard,
        crate::modules::reports::controller::get_attendance_report,
        crate::modules::reports::controller::get_fee_report,
        crate::modules::reports::controller::get_teacher_dashboard,
        crate::modules::reports::controller::get_parent_dashboard,
    ),
    components(
        schemas(
            User,
            UserRole,
            CreateUserDto,
            UpdateUserDto,
            UpdateProfileDto,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            ErrorResponse,
            Student,
            StudentWithClass,
            StudentWithParent,
            CreateStudentDto,
            UpdateStudentDto,
            Class,
            ClassWithTeacher,
            ClassWithSubjects,
            SubjectRef,
            CreateClassDto,
            UpdateClassDto,
            Subject,
            CreateSubjectDto,
            UpdateSubjectDto,
            AssignSubjectsDto,
            Attendance,
            AttendanceStatus,
            AttendanceWithStudent,
            MarkAttendanceDto,
            BulkAttendanceEntry,
            BulkMarkDto,
            BulkMarkOutcome,
            BulkFailure,
            TodaySummary,
            StatusTally,
            Fee,
            CreateFeeDto,
            UpdateFeeStatusDto,
            PayFeeDto,
            FeeStatusSummary,
            GalleryItem,
            CreateGalleryItemDto,
            TimetableEntry,
            TimetableSlot,
            CreateTimetableEntryDto,
            DashboardCounts,
            ClassAttendanceRow,
            FeeStatusRow,
            StudentStatusRow,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, and profile"),
        (name = "Users", description = "Admin user management"),
        (name = "Students", description = "Student roster management"),
        (name = "Classes", description = "Class management"),
        (name = "Subjects", description = "Subject management and assignment"),
        (name = "Attendance", description = "Daily attendance marking and statistics"),
        (name = "Fees", description = "Fee records and payments"),
        (name = "Timetable", description = "Weekly class schedules"),
        (name = "Gallery", description = "School media gallery"),
        (name = "Reports", description = "Admin dashboards and reports"),
    ),
    info(
        title = "ClassHive API",
        description = "Role-based school administration backend: roster, attendance, fees, timetables, and gallery for admins, teachers, and parents.",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
