use enum_display::EnumDisplay;
use time::{Date, OffsetDateTime};
use validator::Validate;

use macros::{DomainPrimitive, PrimitiveDisplay, StringPrimitive};

use crate::models::diary_image::StoredImagePath;
use crate::models::primitives::EntityId;
use crate::models::weather::Weather;
use crate::{DomainError, DomainResult};

/// 体調区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumDisplay)]
#[enum_display(case = "Lower")]
pub enum Condition {
    /// とても悪い
    VeryBad,
    /// 悪い
    Bad,
    /// 普通
    Normal,
    /// 良い
    Good,
    /// とても良い
    VeryGood,
}

impl Condition {
    /// 体調区分コードを返す。
    pub fn code(self) -> i16 {
        match self {
            Condition::VeryBad => 1,
            Condition::Bad => 2,
            Condition::Normal => 3,
            Condition::Good => 4,
            Condition::VeryGood => 5,
        }
    }

    /// 体調区分コードから体調区分を構築する。
    pub fn try_from_code(code: i16) -> DomainResult<Self> {
        match code {
            1 => Ok(Condition::VeryBad),
            2 => Ok(Condition::Bad),
            3 => Ok(Condition::Normal),
            4 => Ok(Condition::Good),
            5 => Ok(Condition::VeryGood),
            _ => Err(DomainError::validation()
                .with_message(format!("体調区分コード({})が範囲外です。", code))),
        }
    }
}

/// 日記ID
pub type DiaryId = EntityId<Diary>;

/// 日記の記事の文字数
const DIARY_ITEM_MIN_LEN: u64 = 1;
const DIARY_ITEM_MAX_LEN: u64 = 1000;

/// 日記の記事
///
/// 1日分の日記に記録する自由記述のテキストを表現する。
#[derive(Debug, Clone, PartialEq, Eq, Validate, DomainPrimitive, PrimitiveDisplay, StringPrimitive)]
#[primitive(
    name = "日記の記事",
    message = "日記の記事は1文字以上1000文字以下を指定してください。"
)]
pub struct DiaryItem {
    #[value_getter(ret = "ref", rty = "&str")]
    #[validate(length(min = DIARY_ITEM_MIN_LEN, max = DIARY_ITEM_MAX_LEN))]
    value: String,
}

/// 日記に記録できる記事の最大数
pub const DIARY_ITEMS_MAX: usize = 10;

/// 日記の記事のリストを検証する。
fn validate_diary_items(items: &[DiaryItem]) -> DomainResult<()> {
    if items.is_empty() {
        return Err(DomainError::validation()
            .with_message("日記には記事を1つ以上記録してください。"));
    }
    if DIARY_ITEMS_MAX < items.len() {
        return Err(DomainError::validation().with_message(format!(
            "日記に記録できる記事は{}個以下です。",
            DIARY_ITEMS_MAX
        )));
    }

    Ok(())
}

/// 登録する日記
///
/// 日記を登録するとき、日記IDにはUUID v4を生成して設定する。
#[derive(Debug, Clone)]
pub struct NewDiary {
    /// 日記ID
    pub id: DiaryId,
    /// 日記の日付
    pub date: Date,
    /// 天気
    pub weather: Weather,
    /// 体調
    pub condition: Condition,
    /// 記事のリスト
    pub items: Vec<DiaryItem>,
    /// 日記の画像のパス
    pub image: Option<StoredImagePath>,
}

impl NewDiary {
    /// 登録する日記を構築する。
    ///
    /// # 引数
    ///
    /// * `date` - 日記の日付
    /// * `weather` - 天気
    /// * `condition` - 体調
    /// * `items` - 記事のリスト
    /// * `image` - 日記の画像のパス
    ///
    /// # 戻り値
    ///
    /// 登録する日記
    pub fn new(
        date: Date,
        weather: Weather,
        condition: Condition,
        items: Vec<DiaryItem>,
        image: Option<StoredImagePath>,
    ) -> DomainResult<Self> {
        validate_diary_items(&items)?;

        Ok(Self {
            id: DiaryId::default(),
            date,
            weather,
            condition,
            items,
            image,
        })
    }
}

/// 日記
///
/// 1日分の日記を表現する。日記は日付ごとに1つだけ記録できる。
#[derive(Debug, Clone)]
pub struct Diary {
    /// 日記ID
    pub id: DiaryId,
    /// 日記の日付
    pub date: Date,
    /// 天気
    pub weather: Weather,
    /// 体調
    pub condition: Condition,
    /// 記事のリスト
    pub items: Vec<DiaryItem>,
    /// 日記の画像のパス
    pub image: Option<StoredImagePath>,
    /// 作成日時
    pub created_at: OffsetDateTime,
    /// 更新日時
    pub updated_at: OffsetDateTime,
}

impl Diary {
    /// 記事のリストを差し替えた日記を返す。
    pub fn with_items(mut self, items: Vec<DiaryItem>) -> DomainResult<Self> {
        validate_diary_items(&items)?;
        self.items = items;

        Ok(self)
    }
}

/// 日記リストのページの件数
const DIARY_PAGE_LIMIT_MIN: u32 = 1;
const DIARY_PAGE_LIMIT_MAX: u32 = 100;

/// 日記リストのページ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiaryPage {
    /// 読み飛ばす件数
    pub offset: u32,
    /// 取得する件数
    pub limit: u32,
}

impl DiaryPage {
    /// 日記リストのページを構築する。
    ///
    /// 取得する件数は1件以上100件以下でなければならない。
    pub fn new(offset: u32, limit: u32) -> DomainResult<Self> {
        if !(DIARY_PAGE_LIMIT_MIN..=DIARY_PAGE_LIMIT_MAX).contains(&limit) {
            return Err(DomainError::validation().with_message(format!(
                "ページの件数は{}件以上{}件以下を指定してください。",
                DIARY_PAGE_LIMIT_MIN, DIARY_PAGE_LIMIT_MAX
            )));
        }

        Ok(Self { offset, limit })
    }
}
