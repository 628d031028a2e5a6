//! Localized interface strings.

use cloudsetup_content::Locale;
use serde::Serialize;

/// UI strings for one locale.
#[derive(Debug, Serialize)]
pub struct Messages {
    pub language_name: &'static str,
    pub tagline: &'static str,
    pub all_guides: &'static str,
    pub platforms: &'static str,
    pub categories: &'static str,
    pub available_guides: &'static str,
    pub no_platform_guides: &'static str,
    pub no_category_guides: &'static str,
    pub minutes: &'static str,
    pub step: &'static str,
    pub toc: &'static str,
    pub prerequisites: &'static str,
    pub next_guides: &'static str,
    pub last_verified: &'static str,
    pub free_tier: &'static str,
    pub conditions: &'static str,
    pub service: &'static str,
    pub not_found_title: &'static str,
    pub not_found_body: &'static str,
    pub back_to_catalog: &'static str,
    pub error_title: &'static str,
    pub search_placeholder: &'static str,
    pub search_no_results: &'static str,
    pub copy: &'static str,
    pub copied: &'static str,
}

static KO: Messages = Messages {
    language_name: "한국어",
    tagline: "클라우드 API 설정을 단계별로 안내합니다",
    all_guides: "전체 가이드",
    platforms: "플랫폼",
    categories: "카테고리",
    available_guides: "사용 가능한 가이드",
    no_platform_guides: "아직 이 플랫폼의 가이드가 없습니다. 곧 추가될 예정입니다!",
    no_category_guides: "아직 이 카테고리의 가이드가 없습니다.",
    minutes: "분",
    step: "단계",
    toc: "목차",
    prerequisites: "사전 준비",
    next_guides: "다음 가이드",
    last_verified: "마지막 검증",
    free_tier: "무료 사용량",
    conditions: "조건",
    service: "서비스",
    not_found_title: "가이드를 찾을 수 없습니다",
    not_found_body: "요청하신 가이드가 없거나 아직 공개되지 않았습니다.",
    back_to_catalog: "가이드 목록으로 돌아가기",
    error_title: "콘텐츠 오류",
    search_placeholder: "가이드 검색...",
    search_no_results: "검색 결과가 없습니다",
    copy: "복사",
    copied: "복사됨",
};

static EN: Messages = Messages {
    language_name: "English",
    tagline: "Step-by-step setup guides for cloud APIs",
    all_guides: "All guides",
    platforms: "Platforms",
    categories: "Categories",
    available_guides: "Available Guides",
    no_platform_guides: "No guides available for this platform yet. Coming soon!",
    no_category_guides: "No guides in this category yet.",
    minutes: "min",
    step: "Step",
    toc: "Contents",
    prerequisites: "Prerequisites",
    next_guides: "Next guides",
    last_verified: "Last verified",
    free_tier: "Free tier",
    conditions: "Conditions",
    service: "Service",
    not_found_title: "Guide not found",
    not_found_body: "The guide you requested does not exist or is not published yet.",
    back_to_catalog: "Back to all guides",
    error_title: "Content error",
    search_placeholder: "Search guides...",
    search_no_results: "No results found",
    copy: "Copy",
    copied: "Copied",
};

impl Messages {
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::Ko => &KO,
            Locale::En => &EN,
        }
    }
}
